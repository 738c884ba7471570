use reqwest::Client;

/// Client for the waitlist relay endpoint, the counterpart of the
/// landing-page form. Normalizes every outcome into success, a rejection
/// message to show the user, or an unreachable-service failure.
#[derive(Debug)]
pub struct WaitlistClient {
    http_client: Client,
    base_url: String,
}

impl WaitlistClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit one signup to the relay. Issues exactly one request; retrying
    /// is left to the caller.
    pub async fn subscribe(&self, email: &str, honeypot: &str) -> Result<(), SignupError> {
        let response = self
            .http_client
            .post(format!("{}/api/subscribe", self.base_url))
            .json(&SubscribeBody {
                email,
                hp: honeypot,
            })
            .send()
            .await
            .map_err(SignupError::Unreachable)?;

        if response.status().is_success() {
            return Ok(());
        }

        let message = response
            .json::<RelayErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| "Subscription failed".to_string());

        Err(SignupError::Rejected(message))
    }
}

#[derive(serde::Serialize)]
struct SubscribeBody<'a> {
    email: &'a str,
    hp: &'a str,
}

#[derive(serde::Deserialize)]
struct RelayErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(thiserror::Error)]
pub enum SignupError {
    /// The relay answered with an error body; the message is meant for the
    /// user (fix the address and resubmit).
    #[error("{0}")]
    Rejected(String),
    #[error("Could not reach the signup service")]
    Unreachable(#[source] reqwest::Error),
}
