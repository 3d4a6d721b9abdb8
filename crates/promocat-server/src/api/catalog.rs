use axum::{
    extract::{Query, State},
    Extension, Json,
};
use promocat_core::{Availability, CatalogItem, CatalogQuery, CatalogView};
use promocat_gateway::load_snapshot;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_gateway_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// One window of the filtered catalog.
#[derive(Debug, Serialize)]
pub(super) struct CatalogPage {
    items: Vec<CatalogItem>,
    /// Items matching the query, visible or not.
    total: usize,
    visible_count: usize,
    page_size: usize,
    has_more: bool,
    categories: Vec<String>,
}

impl From<&CatalogView> for CatalogPage {
    fn from(view: &CatalogView) -> Self {
        Self {
            items: view.visible_items().to_vec(),
            total: view.filtered().len(),
            visible_count: view.visible_count(),
            page_size: view.page_size(),
            has_more: view.has_more(),
            categories: view.categories(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CatalogParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub availability: Option<String>,
    /// Requested window; rounded up to whole pages.
    pub visible: Option<usize>,
}

impl CatalogParams {
    fn to_query(&self) -> CatalogQuery {
        let mut query = CatalogQuery::default().with_search(self.q.as_deref().unwrap_or_default());
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            query = query.with_category(category);
        }
        if let Some(mode) = self.availability.as_deref().filter(|m| !m.is_empty()) {
            query = query.with_availability(Availability::parse(mode));
        }
        query
    }
}

pub(super) async fn show_catalog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<ApiResponse<CatalogPage>>, ApiError> {
    let snapshot = load_snapshot(state.gateway.as_ref())
        .await
        .map_err(|e| map_gateway_error(req_id.0.clone(), &e))?;

    let mut view = CatalogView::with_query(snapshot.catalog(), params.to_query(), state.page_size);
    if let Some(target) = params.visible {
        view.expand_to(target);
    }

    Ok(Json(ApiResponse {
        data: CatalogPage::from(&view),
        meta: ResponseMeta::new(req_id.0),
    }))
}
