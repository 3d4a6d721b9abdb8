//! Load cycles and the browse session that owns the current view.
//!
//! A load cycle fetches products and stocks concurrently and only proceeds
//! once both have arrived; if either fails the cycle fails and nothing is
//! shown. Every navigation starts a new cycle through a [`LoadCoordinator`].
//! Starting a cycle supersedes all older ones: their in-flight fetches are
//! dropped and a result that still manages to arrive late is discarded, so
//! an old response can never overwrite a newer view.

use std::future::Future;
use std::sync::Arc;

use promocat_core::{CatalogItem, CatalogView, DetailPage, Route, StockIndex};
use tokio::sync::{watch, Mutex};

use crate::client::CatalogSource;
use crate::detail::project_detail;
use crate::error::{GatewayError, LoadError};
use crate::normalize::{build_stock_index, normalize_catalog};
use crate::types::RawProduct;

/// Raw products plus the folded stock index from one load cycle.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub products: Vec<RawProduct>,
    pub stocks: StockIndex,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn catalog(&self) -> Vec<CatalogItem> {
        normalize_catalog(&self.products, &self.stocks)
    }

    /// `None` when no product has the parent SKU `id`.
    #[must_use]
    pub fn detail(&self, id: &str) -> Option<DetailPage> {
        project_detail(id, &self.products, &self.stocks)
    }
}

/// Fetches both datasets concurrently and joins them.
///
/// # Errors
///
/// Returns the first [`GatewayError`] from either fetch; the other fetch is
/// dropped.
pub async fn load_snapshot<S: CatalogSource>(source: &S) -> Result<CatalogSnapshot, GatewayError> {
    let (products, stock_rows) = tokio::try_join!(source.fetch_products(), source.fetch_stocks())?;
    let stocks = build_stock_index(&stock_rows);
    tracing::debug!(
        products = products.len(),
        stock_codes = stocks.code_count(),
        "catalog snapshot loaded"
    );
    Ok(CatalogSnapshot { products, stocks })
}

/// Hands out one [`LoadTicket`] per load cycle.
#[derive(Debug, Clone)]
pub struct LoadCoordinator {
    generation: Arc<watch::Sender<u64>>,
}

impl LoadCoordinator {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            generation: Arc::new(tx),
        }
    }

    /// Starts a new cycle, superseding every ticket issued before it.
    #[must_use]
    pub fn begin(&self) -> LoadTicket {
        let mut generation = 0;
        self.generation.send_modify(|current| {
            *current += 1;
            generation = *current;
        });
        LoadTicket {
            generation,
            watcher: self.generation.subscribe(),
        }
    }
}

impl Default for LoadCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellation handle for a single load cycle.
#[derive(Debug)]
pub struct LoadTicket {
    generation: u64,
    watcher: watch::Receiver<u64>,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `false` once a newer cycle has begun.
    #[must_use]
    pub fn is_current(&self) -> bool {
        *self.watcher.borrow() == self.generation
    }

    /// Resolves when a newer cycle begins. Never resolves if the coordinator
    /// is gone.
    pub async fn superseded(&mut self) {
        let generation = self.generation;
        let closed = self
            .watcher
            .wait_for(|current| *current != generation)
            .await
            .is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }

    /// Drives `work` unless this ticket is superseded first.
    ///
    /// # Errors
    ///
    /// [`LoadError::Superseded`] if a newer cycle began before `work`
    /// finished, otherwise whatever `work` failed with.
    pub async fn run<T, F>(&mut self, work: F) -> Result<T, LoadError>
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        tokio::select! {
            biased;
            () = self.superseded() => Err(LoadError::Superseded),
            result = work => result.map_err(LoadError::from),
        }
    }
}

/// What the browse session is currently showing.
#[derive(Debug, Clone)]
pub enum ViewState {
    /// Nothing loaded yet.
    Idle,
    Catalog(CatalogView),
    Detail(DetailPage),
    /// The detail route named a product that does not exist.
    NotFound { id: String },
    /// The last load failed; a new navigation is needed to retry.
    Failed { message: String },
}

/// A single user's walk through the catalog and detail views.
pub struct BrowseSession<S> {
    source: S,
    coordinator: LoadCoordinator,
    page_size: usize,
    state: Mutex<ViewState>,
}

impl<S: CatalogSource> BrowseSession<S> {
    pub fn new(source: S, page_size: usize) -> Self {
        Self {
            source,
            coordinator: LoadCoordinator::new(),
            page_size,
            state: Mutex::new(ViewState::Idle),
        }
    }

    /// Loads fresh data for `route` and replaces the current view with it.
    ///
    /// A failed load switches the view to [`ViewState::Failed`]; a detail
    /// miss switches it to [`ViewState::NotFound`], which is not an error.
    ///
    /// # Errors
    ///
    /// - [`LoadError::Superseded`] if another navigation started meanwhile;
    ///   the view is left to that navigation.
    /// - [`LoadError::Gateway`] if either fetch failed.
    pub async fn navigate(&self, route: &Route) -> Result<(), LoadError> {
        let mut ticket = self.coordinator.begin();
        tracing::debug!(route = %route, generation = ticket.generation(), "navigation started");

        let loaded = match ticket.run(load_snapshot(&self.source)).await {
            Ok(snapshot) => Ok(self.render(route, &snapshot)),
            Err(LoadError::Gateway(e)) => Err(e),
            Err(LoadError::Superseded) => {
                tracing::debug!(route = %route, "navigation superseded before load finished");
                return Err(LoadError::Superseded);
            }
        };

        let mut state = self.state.lock().await;
        if !ticket.is_current() {
            tracing::debug!(route = %route, "discarding stale load result");
            return Err(LoadError::Superseded);
        }

        match loaded {
            Ok(view) => {
                *state = view;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(route = %route, error = %e, "catalog load failed");
                *state = ViewState::Failed {
                    message: e.to_string(),
                };
                Err(e.into())
            }
        }
    }

    fn render(&self, route: &Route, snapshot: &CatalogSnapshot) -> ViewState {
        match route {
            Route::Catalog => {
                ViewState::Catalog(CatalogView::new(snapshot.catalog(), self.page_size))
            }
            Route::Product(id) => snapshot
                .detail(id)
                .map_or_else(|| ViewState::NotFound { id: id.clone() }, ViewState::Detail),
        }
    }

    /// Copy of the current view.
    pub async fn state(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    /// Applies `update` to the catalog view, if the catalog is showing.
    pub async fn update_catalog<R>(&self, update: impl FnOnce(&mut CatalogView) -> R) -> Option<R> {
        match &mut *self.state.lock().await {
            ViewState::Catalog(view) => Some(update(view)),
            _ => None,
        }
    }

    /// Returns `false` when the catalog is not showing.
    pub async fn search(&self, term: &str) -> bool {
        self.update_catalog(|view| view.search(term)).await.is_some()
    }

    pub async fn filter_by_category(&self, category: Option<&str>) -> bool {
        self.update_catalog(|view| view.filter_by_category(category))
            .await
            .is_some()
    }

    pub async fn filter_by_availability(&self, mode: &str) -> bool {
        self.update_catalog(|view| view.filter_by_availability(mode))
            .await
            .is_some()
    }

    pub async fn clear_filters(&self) -> bool {
        self.update_catalog(CatalogView::clear).await.is_some()
    }

    /// New visible count, or `None` when the catalog is not showing.
    pub async fn load_more(&self) -> Option<usize> {
        self.update_catalog(CatalogView::load_more).await
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
