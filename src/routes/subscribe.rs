use crate::{
    domain::SignupEmail,
    list_client::{AddMemberError, ListClient},
    metrics::SignupMetrics,
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use utoipa::ToSchema;

/// A signup request as sent by the landing-page form. `hp` is the honeypot
/// field: hidden from humans, filled in by form-filler bots.
#[derive(Debug, serde::Deserialize, ToSchema)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub hp: String,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct SubscribeResponse {
    pub ok: bool,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Create a router to serve the signup relay.
pub fn create_router() -> Router<AppState> {
    Router::new().route(
        "/subscribe",
        post(subscribe).fallback(method_not_allowed),
    )
}

/// Relay a waitlist signup to the mailing-list provider.
#[tracing::instrument(
    name = "Relaying a waitlist signup",
    skip(list_client, metrics, request),
    fields(signup_email = %request.email)
)]
#[utoipa::path(
    post,
    path = "/api/subscribe",
    request_body = SubscribeRequest,
    responses(
        (status = OK, description = "Signup accepted", body = SubscribeResponse),
        (status = BAD_REQUEST, description = "Invalid email or provider rejection", body = ErrorBody),
        (status = METHOD_NOT_ALLOWED, description = "Only POST is accepted", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Provider unreachable", body = ErrorBody),
    )
)]
pub async fn subscribe(
    State(list_client): State<Arc<ListClient>>,
    State(metrics): State<Arc<SignupMetrics>>,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, SubscribeError> {
    // Bots that fill the hidden field get the same answer as a real signup,
    // so probing the endpoint gives them no signal they were detected. The
    // provider is never contacted.
    if !request.hp.is_empty() {
        tracing::info!("Honeypot field was filled, dropping the submission");
        metrics.record_honeypot_trip();
        return Ok(Json(SubscribeResponse { ok: true }));
    }

    let email =
        SignupEmail::parse(request.email).map_err(|_| SubscribeError::InvalidEmail)?;

    match list_client.add_pending_member(&email).await {
        Ok(()) => {
            tracing::info!("Signup relayed to the mailing-list provider");
            metrics.record_relayed();
            Ok(Json(SubscribeResponse { ok: true }))
        }
        Err(AddMemberError::Rejected(detail)) => {
            tracing::warn!("Provider rejected the signup: {detail}");
            metrics.record_rejected();
            Err(SubscribeError::Rejected(detail))
        }
        Err(AddMemberError::Transport(e)) => Err(SubscribeError::Unexpected(e.into())),
    }
}

/// Serves the wrong-method error body. Registered as the method fallback on
/// the subscribe route, so it replies before the request body is touched.
async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "Method not allowed".to_string(),
        }),
    )
        .into_response()
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("Valid email required")]
    InvalidEmail,
    /// The provider declined the address; its detail message is passed on.
    #[error("{0}")]
    Rejected(String),
    /// Anything that went wrong talking to the provider. The cause is logged
    /// but deliberately not disclosed to the caller.
    #[error("Server error")]
    Unexpected(#[source] anyhow::Error),
}

impl IntoResponse for SubscribeError {
    fn into_response(self) -> Response {
        let status = match &self {
            SubscribeError::InvalidEmail | SubscribeError::Rejected(_) => StatusCode::BAD_REQUEST,
            SubscribeError::Unexpected(_) => {
                tracing::error!("Failed to relay a signup: {self:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
