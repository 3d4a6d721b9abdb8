use axum::{
    extract::{Path, State},
    Extension, Json,
};
use promocat_core::DetailPage;
use promocat_gateway::load_snapshot;

use crate::middleware::RequestId;

use super::{map_gateway_error, ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn show_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DetailPage>>, ApiError> {
    let snapshot = load_snapshot(state.gateway.as_ref())
        .await
        .map_err(|e| map_gateway_error(req_id.0.clone(), &e))?;

    let Some(page) = snapshot.detail(&id) else {
        tracing::debug!(product_id = %id, "product not found");
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("product {id} not found"),
        ));
    };

    Ok(Json(ApiResponse {
        data: page,
        meta: ResponseMeta::new(req_id.0),
    }))
}
