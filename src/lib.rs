pub mod client;
pub mod configuration;
pub mod domain;
mod error;
pub mod list_client;
pub mod metrics;
mod routes;
pub mod signup_form;
mod state;
pub mod telemetry;

use crate::{configuration::Settings, list_client::ListClient, metrics::SignupMetrics};
use axum::{routing::IntoMakeService, Router, Server};
use hyper::server::conn::AddrIncoming;
use state::AppState;
use std::net::TcpListener;

/// The assembled application, bound to a port but not yet serving.
pub struct App {
    port: u16,
    server: Server<AddrIncoming, IntoMakeService<Router>>,
}

impl App {
    /// Build the application from its configuration: bind the listener and
    /// wire the mailing-list client and metrics into the router.
    pub fn build(configuration: Settings) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(configuration.application().address())?;
        let port = listener.local_addr()?.port();

        let list_client = ListClient::from(configuration.mailing_list());
        let metrics = SignupMetrics::new()?;
        let app_state = AppState::create(list_client, metrics);
        let router = routes::build_router(&app_state);

        let server = Server::from_tcp(listener)?.serve(router.into_make_service());

        Ok(Self { port, server })
    }

    /// The port the application is bound to. Useful when the configuration
    /// requested port 0.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until it is stopped.
    pub async fn run_until_stopped(self) -> hyper::Result<()> {
        tracing::info!("Server running on port {}", self.port);
        self.server.await
    }
}
