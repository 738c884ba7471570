use anyhow::Context;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use std::sync::Arc;

/// Counters for the signup relay, exposed at `/metrics` in the Prometheus
/// text format.
pub struct SignupMetrics {
    registry: Registry,
    relayed: IntCounter,
    rejected: IntCounter,
    honeypot_trips: IntCounter,
}

impl SignupMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let relayed = IntCounter::new(
            "signups_relayed_total",
            "Signups accepted by the mailing-list provider, duplicates included",
        )
        .context("Failed to create `signups_relayed_total` counter")?;
        registry
            .register(Box::new(relayed.clone()))
            .context("Failed to register `signups_relayed_total` counter")?;

        let rejected = IntCounter::new(
            "signups_rejected_total",
            "Signups the mailing-list provider declined",
        )
        .context("Failed to create `signups_rejected_total` counter")?;
        registry
            .register(Box::new(rejected.clone()))
            .context("Failed to register `signups_rejected_total` counter")?;

        let honeypot_trips = IntCounter::new(
            "signup_honeypot_trips_total",
            "Signup requests dropped because the honeypot field was filled",
        )
        .context("Failed to create `signup_honeypot_trips_total` counter")?;
        registry
            .register(Box::new(honeypot_trips.clone()))
            .context("Failed to register `signup_honeypot_trips_total` counter")?;

        Ok(Self {
            registry,
            relayed,
            rejected,
            honeypot_trips,
        })
    }

    pub fn record_relayed(&self) {
        self.relayed.inc();
    }

    pub fn record_rejected(&self) {
        self.rejected.inc();
    }

    pub fn record_honeypot_trip(&self) {
        self.honeypot_trips.inc();
    }
}

#[tracing::instrument(skip(metrics))]
#[utoipa::path(
    get,
    path = "/metrics",
    responses((status = OK, description = "Signup counters in the Prometheus text format"))
)]
pub async fn metrics_endpoint(
    State(metrics): State<Arc<SignupMetrics>>,
) -> Result<String, MetricsError> {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    let metric_families = metrics.registry.gather();
    encoder
        .encode(&metric_families, &mut buffer)
        .context("Failed to encode metrics")
        .map_err(MetricsError::UnexpectedError)?;

    String::from_utf8(buffer)
        .context("Failed to convert metrics to a valid string")
        .map_err(MetricsError::UnexpectedError)
}

#[derive(thiserror::Error)]
pub enum MetricsError {
    #[error("Unexpected error when generating metrics")]
    UnexpectedError(#[source] anyhow::Error),
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
