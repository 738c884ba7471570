use axum::{routing::get, Json, Router};
use lazy_static::lazy_static;
use utoipa::ToSchema;

lazy_static! {
    static ref VERSION: String = env!("CARGO_PKG_VERSION").to_string();
}

/// Create a router to serve health checks.
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(is_alive))
        .route("/info", get(build_info))
}

/// Simple `is_alive` endpoint that will always return a 200 OK.
/// Used to indicate when the webserver is up and running.
#[tracing::instrument]
#[utoipa::path(
    get,
    path = "/health",
    responses((status = OK, description = "Check if service is alive"))
)]
pub async fn is_alive() -> http::StatusCode {
    tracing::debug!("Service is alive");
    http::StatusCode::OK
}

#[derive(serde::Serialize, ToSchema)]
pub struct BuildInfo<'a> {
    version: &'a str,
}

/// Endpoint to get current information about the server's version.
#[tracing::instrument]
#[utoipa::path(
    get,
    path = "/health/info",
    responses((status = OK, description = "Build info for this service", body = BuildInfo))
)]
pub async fn build_info<'a>() -> Json<BuildInfo<'a>> {
    Json(BuildInfo {
        version: VERSION.as_str(),
    })
}
