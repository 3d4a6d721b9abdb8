//! Search, category and availability filtering plus the catalog window.
//!
//! Filtering is expressed as a [`CatalogQuery`] whose predicates are combined
//! conjunctively. While no availability mode is chosen, zero-stock items are
//! hidden; choosing a mode replaces that default stock constraint. A query
//! with a single predicate set therefore reproduces the standalone
//! [`search`], [`filter_by_category`] and [`filter_by_availability`]
//! operations exactly.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

/// Default number of items revealed per "load more" step.
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Stock constraint selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Availability {
    /// Only items with stock.
    Available,
    /// Only items with zero stock.
    SoldOut,
    /// No stock constraint at all.
    Any,
}

impl Availability {
    /// Parses a filter mode. Unknown or empty modes mean [`Availability::Any`].
    #[must_use]
    pub fn parse(mode: &str) -> Self {
        match mode.trim() {
            "available" | "disponible" => Self::Available,
            "soldOut" | "sold_out" | "agotado" => Self::SoldOut,
            _ => Self::Any,
        }
    }

    #[must_use]
    pub fn admits(self, stock: u64) -> bool {
        match self {
            Self::Available => stock > 0,
            Self::SoldOut => stock == 0,
            Self::Any => true,
        }
    }
}

/// Conjunctive predicate set applied to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against name or description.
    pub search_term: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// `None` keeps the default "in stock only" constraint.
    pub availability: Option<Availability>,
}

impl CatalogQuery {
    /// Sets the search term; blank terms clear it.
    #[must_use]
    pub fn with_search(mut self, term: &str) -> Self {
        self.search_term = normalize_term(term);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = Some(availability);
        self
    }

    /// `true` when nothing but the default stock constraint is active.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.search_term.is_none() && self.category.is_none() && self.availability.is_none()
    }

    #[must_use]
    pub fn matches(&self, item: &CatalogItem) -> bool {
        let availability = self.availability.unwrap_or(Availability::Available);
        if !availability.admits(item.stock) {
            return false;
        }

        if let Some(category) = &self.category {
            if &item.category != category {
                return false;
            }
        }

        match &self.search_term {
            Some(term) => {
                let needle = term.to_lowercase();
                item.name.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    /// Matching items in source order.
    #[must_use]
    pub fn apply(&self, items: &[CatalogItem]) -> Vec<CatalogItem> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

/// Blank terms clear the predicate; anything else is matched verbatim.
fn normalize_term(term: &str) -> Option<String> {
    (!term.trim().is_empty()).then(|| term.to_string())
}

/// Items with stock. This is the initial view and the "cleared search" view.
#[must_use]
pub fn apply_default_view(items: &[CatalogItem]) -> Vec<CatalogItem> {
    CatalogQuery::default().apply(items)
}

/// Items in stock whose name or description contains `term`, ignoring case.
///
/// A blank term is the same as [`apply_default_view`].
#[must_use]
pub fn search(items: &[CatalogItem], term: &str) -> Vec<CatalogItem> {
    CatalogQuery::default().with_search(term).apply(items)
}

/// Items in stock whose category equals `category` exactly.
#[must_use]
pub fn filter_by_category(items: &[CatalogItem], category: &str) -> Vec<CatalogItem> {
    CatalogQuery::default().with_category(category).apply(items)
}

/// Items filtered by stock according to `mode`; see [`Availability::parse`].
#[must_use]
pub fn filter_by_availability(items: &[CatalogItem], mode: &str) -> Vec<CatalogItem> {
    CatalogQuery::default()
        .with_availability(Availability::parse(mode))
        .apply(items)
}

/// Next visible count after a "load more" request.
///
/// Once `visible` already covers `total` the count is returned unchanged.
#[must_use]
pub fn load_more(visible: usize, page_size: usize, total: usize) -> usize {
    if visible >= total {
        visible
    } else {
        visible.saturating_add(page_size)
    }
}

/// Distinct non-empty categories in first-seen order.
#[must_use]
pub fn categories(items: &[CatalogItem]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .filter(|item| !item.category.is_empty())
        .filter(|item| seen.insert(item.category.as_str()))
        .map(|item| item.category.clone())
        .collect()
}

/// Catalog page state: the loaded items, the active query, and the window.
#[derive(Debug, Clone)]
pub struct CatalogView {
    items: Vec<CatalogItem>,
    query: CatalogQuery,
    filtered: Vec<CatalogItem>,
    page_size: usize,
    visible: usize,
}

impl CatalogView {
    /// Starts on the default view with one page visible.
    ///
    /// A `page_size` of zero is bumped to one.
    #[must_use]
    pub fn new(items: Vec<CatalogItem>, page_size: usize) -> Self {
        Self::with_query(items, CatalogQuery::default(), page_size)
    }

    #[must_use]
    pub fn with_query(items: Vec<CatalogItem>, query: CatalogQuery, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let filtered = query.apply(&items);
        Self {
            items,
            query,
            filtered,
            page_size,
            visible: page_size,
        }
    }

    #[must_use]
    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Every item matching the current query.
    #[must_use]
    pub fn filtered(&self) -> &[CatalogItem] {
        &self.filtered
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Requested window size. May exceed `filtered().len()`.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    #[must_use]
    pub fn visible_items(&self) -> &[CatalogItem] {
        let end = self.visible.min(self.filtered.len());
        &self.filtered[..end]
    }

    /// Whether a "load more" control should be offered.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.filtered.len() > self.visible
    }

    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        categories(&self.items)
    }

    pub fn search(&mut self, term: &str) {
        self.query.search_term = normalize_term(term);
        self.refilter();
    }

    /// Restricts to `category`; `None` lifts the category predicate.
    pub fn filter_by_category(&mut self, category: Option<&str>) {
        self.query.category = category.map(str::to_string);
        self.refilter();
    }

    pub fn filter_by_availability(&mut self, mode: &str) {
        self.query.availability = Some(Availability::parse(mode));
        self.refilter();
    }

    pub fn apply_query(&mut self, query: CatalogQuery) {
        self.query = query;
        self.refilter();
    }

    /// Back to the default view.
    pub fn clear(&mut self) {
        self.apply_query(CatalogQuery::default());
    }

    /// Reveals another page and returns the new visible count.
    pub fn load_more(&mut self) -> usize {
        self.visible = load_more(self.visible, self.page_size, self.filtered.len());
        self.visible
    }

    /// Loads more pages until at least `target` items are requested or
    /// nothing is left to reveal.
    pub fn expand_to(&mut self, target: usize) -> usize {
        while self.visible < target && self.has_more() {
            self.load_more();
        }
        self.visible
    }

    fn refilter(&mut self) {
        self.filtered = self.query.apply(&self.items);
        self.visible = self.page_size;
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
