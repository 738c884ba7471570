use crate::{configuration::MailingListSettings, domain::SignupEmail};
use reqwest::{header::AUTHORIZATION, Client};
use secrecy::{ExposeSecret, Secret};

/// Client for the mailing-list provider's "add member" endpoint.
///
/// New members are created with a `pending` status, so the provider sends a
/// double opt-in confirmation email before the address becomes active.
#[derive(Debug)]
pub struct ListClient {
    http_client: Client,
    members_url: String,
    api_key: Secret<String>,
}

impl ListClient {
    pub fn new(members_url: String, api_key: Secret<String>) -> Self {
        Self {
            http_client: Client::new(),
            members_url,
            api_key,
        }
    }

    /// Ask the provider to add `email` to the audience as a pending member.
    ///
    /// Resubscribing an existing address is treated as success: the provider
    /// reports it as a `Member Exists` error, which is folded into `Ok` so a
    /// repeated signup never surfaces as a failure to the caller.
    pub async fn add_pending_member(&self, email: &SignupEmail) -> Result<(), AddMemberError> {
        let request_body = AddMemberRequest {
            email_address: email.as_ref(),
            status: "pending",
        };

        let response = self
            .http_client
            .post(&self.members_url)
            .header(
                AUTHORIZATION,
                format!("apikey {}", self.api_key.expose_secret()),
            )
            .json(&request_body)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        // A rejection the provider could not express as its documented
        // `{title, detail}` shape counts as a transport failure.
        let body: ProviderErrorBody = response.json().await?;
        if body.title.as_deref() == Some("Member Exists") {
            return Ok(());
        }

        Err(AddMemberError::Rejected(
            body.detail
                .unwrap_or_else(|| "Subscription failed".to_string()),
        ))
    }
}

impl From<&MailingListSettings> for ListClient {
    fn from(settings: &MailingListSettings) -> Self {
        Self::new(settings.members_url(), settings.api_key.clone())
    }
}

#[derive(serde::Serialize)]
struct AddMemberRequest<'a> {
    email_address: &'a str,
    status: &'a str,
}

/// The narrow slice of the provider's error responses the relay depends on.
#[derive(serde::Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

#[derive(thiserror::Error)]
pub enum AddMemberError {
    /// The provider declined the address for a reason other than it already
    /// being a member. Carries the provider's own detail message.
    #[error("{0}")]
    Rejected(String),
    #[error("Failed to reach the mailing-list provider")]
    Transport(#[from] reqwest::Error),
}
