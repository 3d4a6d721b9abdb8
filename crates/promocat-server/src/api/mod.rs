mod catalog;
mod products;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode, Uri},
    response::{IntoResponse, Redirect},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use promocat_core::route::{Route, CATALOG_PATH};
use promocat_gateway::{GatewayClient, GatewayError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<GatewayClient>,
    pub page_size: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Any failed load cycle is reported as a 502; the cause is only logged.
pub(super) fn map_gateway_error(request_id: String, error: &GatewayError) -> ApiError {
    tracing::error!(
        request_id = %request_id,
        error = %error,
        transport = error.is_transport(),
        "catalog load failed"
    );
    ApiError::new(request_id, "upstream_error", "catalog service unavailable")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route(CATALOG_PATH, get(catalog::show_catalog))
        .route(
            &format!("{CATALOG_PATH}/product/{{id}}"),
            get(products::show_product),
        )
        .fallback(redirect_unmatched)
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Known views reached through a non-canonical path (trailing slash) go to
/// their canonical path; everything else goes to the catalog.
async fn redirect_unmatched(uri: Uri) -> Redirect {
    Redirect::temporary(&Route::resolve(uri.path()).path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use promocat_gateway::{Credentials, GatewayConfig};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_catalog(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/api/all-products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "response": [
                    {
                        "skuPadre": "A1", "nombrePadre": "Taza Roja",
                        "descripcion": "Ceramica", "categorias": "Mugs",
                        "imagenesPadre": ["a1.jpg"],
                        "hijos": [{ "skuHijo": "A1-R", "color": "rojo", "tipo": "11oz" }]
                    },
                    { "skuPadre": "A2", "nombrePadre": "Taza Azul", "categorias": "Mugs" },
                    { "skuPadre": "A3", "nombrePadre": "Taza Verde", "categorias": "Mugs" },
                    { "skuPadre": "B1", "nombrePadre": "Termo Acero", "categorias": "Termos" }
                ]
            })))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/all-stocks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "Stocks": [
                    { "Material": "A1", "Stock": 5 },
                    { "Material": "A1-R", "Stock": 4 },
                    { "Material": "A3", "Stock": 2 },
                    { "Material": "B1", "Stock": 3 }
                ]
            })))
            .mount(server)
            .await;
    }

    fn test_app(server: &MockServer, page_size: usize) -> Router {
        let config = GatewayConfig::new(
            format!("{}/api", server.uri()),
            Credentials::new("demo-user", "demo-password"),
        );
        let gateway = GatewayClient::new(config).expect("client");
        build_app(AppState {
            gateway: Arc::new(gateway),
            page_size,
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    fn ids(json: &Value) -> Vec<&str> {
        json["data"]["items"]
            .as_array()
            .expect("items array")
            .iter()
            .map(|item| item["id"].as_str().expect("id"))
            .collect()
    }

    #[test]
    fn api_error_upstream_error_maps_to_bad_gateway() {
        let response = ApiError::new("req-1", "upstream_error", "down").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn health_echoes_request_id() {
        let server = MockServer::start().await;
        let response = test_app(&server, 24)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
            Some("req-42")
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["meta"]["request_id"], "req-42");
    }

    #[tokio::test]
    async fn catalog_defaults_to_in_stock_items() {
        let server = MockServer::start().await;
        mock_catalog(&server).await;

        let (status, json) = get_json(test_app(&server, 24), "/promocionales").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), ["A1", "A3", "B1"]);
        assert_eq!(json["data"]["total"], 3);
        assert_eq!(json["data"]["has_more"], false);
        assert_eq!(json["data"]["categories"], json!(["Mugs", "Termos"]));
        assert_eq!(json["data"]["items"][0]["product_type"], "11oz");
    }

    #[tokio::test]
    async fn catalog_applies_query_parameters() {
        let server = MockServer::start().await;
        mock_catalog(&server).await;

        let app = test_app(&server, 24);
        let (_, json) = get_json(app, "/promocionales?q=TAZA&category=Mugs").await;
        assert_eq!(ids(&json), ["A1", "A3"]);

        let app = test_app(&server, 24);
        let (_, json) = get_json(app, "/promocionales?availability=agotado").await;
        assert_eq!(ids(&json), ["A2"]);

        let (_, json) = get_json(test_app(&server, 24), "/promocionales?availability=all&q=").await;
        assert_eq!(ids(&json), ["A1", "A2", "A3", "B1"]);
    }

    #[tokio::test]
    async fn catalog_windows_by_page_size_and_visible() {
        let server = MockServer::start().await;
        mock_catalog(&server).await;

        let (_, json) = get_json(test_app(&server, 2), "/promocionales").await;
        assert_eq!(ids(&json), ["A1", "A3"]);
        assert_eq!(json["data"]["visible_count"], 2);
        assert_eq!(json["data"]["has_more"], true);

        let (_, json) = get_json(test_app(&server, 2), "/promocionales?visible=3").await;
        assert_eq!(ids(&json), ["A1", "A3", "B1"]);
        assert_eq!(json["data"]["visible_count"], 4);
        assert_eq!(json["data"]["has_more"], false);
    }

    #[tokio::test]
    async fn product_route_returns_detail_page() {
        let server = MockServer::start().await;
        mock_catalog(&server).await;

        let (status, json) = get_json(test_app(&server, 24), "/promocionales/product/A1").await;
        assert_eq!(status, StatusCode::OK);
        let product = &json["data"]["product"];
        assert_eq!(product["id"], "A1");
        assert_eq!(product["stock"], 5);
        assert_eq!(product["colors"][0]["stock"], 4);
        assert_eq!(product["colors"][0]["color_hex"], "#ff0000");
        let related: Vec<&str> = json["data"]["related"]
            .as_array()
            .expect("related")
            .iter()
            .map(|r| r["id"].as_str().expect("id"))
            .collect();
        assert_eq!(related, ["A2", "A3"]);
    }

    #[tokio::test]
    async fn unknown_product_is_404() {
        let server = MockServer::start().await;
        mock_catalog(&server).await;

        let (status, json) = get_json(test_app(&server, 24), "/promocionales/product/ZZ").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn upstream_rejection_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
            .mount(&server)
            .await;

        let (status, json) = get_json(test_app(&server, 24), "/promocionales").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "upstream_error");
    }

    #[tokio::test]
    async fn trailing_slash_redirects_to_canonical_view() {
        let server = MockServer::start().await;
        for (uri, location) in [
            ("/promocionales/product/A1/", "/promocionales/product/A1"),
            ("/promocionales/", "/promocionales"),
        ] {
            let response = test_app(&server, 24)
                .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{uri}");
            assert_eq!(
                response.headers().get("location").and_then(|v| v.to_str().ok()),
                Some(location)
            );
        }
    }

    #[tokio::test]
    async fn unknown_paths_redirect_to_catalog() {
        let server = MockServer::start().await;
        for uri in ["/", "/somewhere/else", "/promocionales/product"] {
            let response = test_app(&server, 24)
                .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{uri}");
            assert_eq!(
                response.headers().get("location").and_then(|v| v.to_str().ok()),
                Some("/promocionales")
            );
        }
    }
}
