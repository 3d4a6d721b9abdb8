//! One-shot catalog commands: `catalog`, `product`, `categories`.
//!
//! Each command runs a single load cycle against the gateway and prints the
//! result as a table or, with `--json`, as pretty-printed JSON.

use promocat_core::{Availability, CatalogQuery, CatalogView, DetailPage};
use promocat_gateway::{load_snapshot, GatewayClient};

/// Filters accepted by the `catalog` command.
#[derive(Debug, Default)]
pub(crate) struct CatalogFilters {
    pub search: Option<String>,
    pub category: Option<String>,
    pub availability: Option<String>,
    pub visible: Option<usize>,
}

impl CatalogFilters {
    pub(crate) fn query(&self) -> CatalogQuery {
        let mut query =
            CatalogQuery::default().with_search(self.search.as_deref().unwrap_or_default());
        if let Some(category) = &self.category {
            query = query.with_category(category.as_str());
        }
        if let Some(mode) = &self.availability {
            query = query.with_availability(Availability::parse(mode));
        }
        query
    }
}

/// Print the filtered catalog window.
///
/// # Errors
///
/// Returns an error if either fetch fails.
pub(crate) async fn run_catalog(
    client: &GatewayClient,
    page_size: usize,
    filters: &CatalogFilters,
    json: bool,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(client).await?;
    let mut view = CatalogView::with_query(snapshot.catalog(), filters.query(), page_size);
    if let Some(target) = filters.visible {
        view.expand_to(target);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(view.visible_items())?);
        return Ok(());
    }

    print_catalog(&view);
    Ok(())
}

/// Print one product's detail page, or a not-found notice.
///
/// # Errors
///
/// Returns an error if either fetch fails.
pub(crate) async fn run_product(
    client: &GatewayClient,
    id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(client).await?;
    let Some(page) = snapshot.detail(id) else {
        println!("{}", not_found_message(id));
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    print_detail(&page);
    Ok(())
}

/// Print every category in first-seen order.
///
/// # Errors
///
/// Returns an error if either fetch fails.
pub(crate) async fn run_categories(client: &GatewayClient) -> anyhow::Result<()> {
    let snapshot = load_snapshot(client).await?;
    let categories = promocat_core::categories(&snapshot.catalog());
    if categories.is_empty() {
        println!("no categories found");
        return Ok(());
    }
    for category in categories {
        println!("{category}");
    }
    Ok(())
}

pub(crate) fn not_found_message(id: &str) -> String {
    format!("product '{id}' not found")
}

pub(crate) fn print_catalog(view: &CatalogView) {
    let items = view.visible_items();
    if items.is_empty() {
        println!("no products match the current filters");
        return;
    }

    println!("{:<16}{:<42}{:<22}{:<12}STOCK", "SKU", "NAME", "CATEGORY", "TYPE");
    for item in items {
        println!(
            "{:<16}{:<42}{:<22}{:<12}{}",
            item.id,
            truncate(&item.name, 40),
            truncate(&item.category, 20),
            truncate(&item.product_type, 10),
            item.stock
        );
    }
    println!(
        "showing {} of {} matching products",
        items.len(),
        view.filtered().len()
    );
    if view.has_more() {
        let next = view.visible_count() + view.page_size();
        println!("more available: `more` in browse mode, or --visible {next}");
    }
}

pub(crate) fn print_detail(page: &DetailPage) {
    let product = &page.product;
    println!("{} ({})", product.name, product.id);
    if !product.product_type.is_empty() {
        println!("type: {}", product.product_type);
    }
    println!("stock: {}", product.stock);
    println!("images: {}", product.images.len());

    println!();
    for row in product.details.rows() {
        println!("{:<20}{}", row.label, row.value);
    }

    if !product.colors.is_empty() {
        println!();
        println!("{:<20}{:<10}STOCK", "COLOR", "SWATCH");
        for color in &product.colors {
            println!("{:<20}{:<10}{}", color.name, color.color_hex, color.stock);
        }
    }

    if !page.related.is_empty() {
        println!();
        println!("related:");
        for item in &page.related {
            println!("  {:<16}{:<42}{}", item.id, truncate(&item.name, 40), item.stock);
        }
    }
}

/// Shortens `text` to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max.saturating_sub(3)).collect::<String>())
    } else {
        text.to_string()
    }
}
