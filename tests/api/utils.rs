use once_cell::sync::Lazy;
use secrecy::Secret;
use waitlist::{
    configuration::get_configuration,
    telemetry::{get_subscriber, init_subscriber},
    App,
};
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber("test".into(), std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber("test".into(), std::io::sink);
        init_subscriber(subscriber);
    };
});

pub struct TestApp {
    pub address: String,
    /// Wiremock stand-in for the mailing-list provider.
    pub provider_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_subscribe(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/subscribe", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{path}", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// Spawn an instance of the app on a random port, pointed at a mock
/// mailing-list provider.
pub async fn spawn_app() -> anyhow::Result<TestApp> {
    Lazy::force(&TRACING);

    let provider_server = MockServer::start().await;

    let config = {
        let mut c = get_configuration().expect("Failed to read configuration");

        // Make OS choose random port
        c.application.port = 0;
        // Route provider calls to the mock server
        c.mailing_list.api_base = Some(provider_server.uri());
        c.mailing_list.audience_id = "test-audience".to_string();
        c.mailing_list.api_key = Secret::new("test-key".to_string());

        c
    };

    let app = App::build(config)?;
    let application_port = app.port();

    // Start server
    let _ = tokio::spawn(app.run_until_stopped());

    Ok(TestApp {
        address: format!("http://127.0.0.1:{application_port}"),
        provider_server,
        api_client: reqwest::Client::new(),
    })
}
