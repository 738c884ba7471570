use crate::routes::*;
use axum::{response::IntoResponse, routing::get, Router};
use http::header;
use utoipa::OpenApi;

/// Documentation for the service. Can be converted into JSON or YAML.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::is_alive,
        health::build_info,
        subscribe::subscribe,
        crate::metrics::metrics_endpoint,
    ),
    components(schemas(
        health::BuildInfo,
        subscribe::SubscribeRequest,
        subscribe::SubscribeResponse,
        subscribe::ErrorBody,
    ))
)]
struct ApiDoc;

pub fn create_router() -> Router {
    Router::new()
        .route("/openapi.json", get(serve_openapi_docs_as_json))
        .route("/openapi.yaml", get(serve_openapi_docs_as_yaml))
}

/// Endpoint to serve OpenApi docs as JSON.
#[tracing::instrument]
async fn serve_openapi_docs_as_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        ApiDoc::openapi().to_json().unwrap(),
    )
}

/// Endpoint to serve OpenApi docs as YAML.
#[tracing::instrument]
async fn serve_openapi_docs_as_yaml() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/yaml")],
        ApiDoc::openapi().to_yaml().unwrap(),
    )
}
