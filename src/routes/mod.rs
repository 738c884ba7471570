use crate::state::AppState;
use axum::{routing::get, Router};

pub mod docs;
pub mod health;
pub mod subscribe;

pub fn build_router(app_state: &AppState) -> Router {
    use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
    use tracing::Level;

    Router::new()
        .nest("/health", health::create_router())
        .nest("/docs", docs::create_router())
        .nest(
            "/api",
            subscribe::create_router().with_state(app_state.clone()),
        )
        .route(
            "/metrics",
            get(crate::metrics::metrics_endpoint).with_state(app_state.metrics().clone()),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
