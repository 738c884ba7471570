use crate::{list_client::ListClient, metrics::SignupMetrics};
use axum::extract::FromRef;
use derive_getters::Getters;
use duplicate::duplicate_item;
use std::sync::Arc;

#[derive(Clone, Getters)]
pub struct AppState {
    list_client: Arc<ListClient>,
    metrics: Arc<SignupMetrics>,
}

impl AppState {
    pub fn create(list_client: ListClient, metrics: SignupMetrics) -> Self {
        Self {
            list_client: Arc::new(list_client),
            metrics: Arc::new(metrics),
        }
    }
}

#[duplicate_item(
    service_type      field;
    [ ListClient ]    [ list_client ];
    [ SignupMetrics ] [ metrics ];
)]
impl FromRef<AppState> for Arc<service_type> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.field.clone()
    }
}
