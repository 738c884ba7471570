use crate::client::{SignupError, WaitlistClient};
use std::sync::Mutex;

/// Shown when the relay itself could not be reached. Distinct from the
/// validation messages the relay sends back.
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the server. Please try again.";

/// Where a signup attempt currently stands. A fresh form is `Idle`;
/// `Failed` re-enables the form so the user can correct and resubmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

struct FormFields {
    email: String,
    honeypot: String,
    status: SignupStatus,
}

/// Submission-state handling shared by every visual variant of the signup
/// form: one email field, a hidden honeypot field, and a single-flight
/// guard against rapid repeated submits.
///
/// The fields sit behind a mutex so the guard holds even when `submit` is
/// called concurrently; the lock is never held across the network call.
pub struct SignupForm {
    client: WaitlistClient,
    fields: Mutex<FormFields>,
}

impl SignupForm {
    pub fn new(client: WaitlistClient) -> Self {
        Self {
            client,
            fields: Mutex::new(FormFields {
                email: String::new(),
                honeypot: String::new(),
                status: SignupStatus::Idle,
            }),
        }
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.lock().email = email.into();
    }

    /// Humans never see the honeypot field; only automated form fillers
    /// write to it.
    pub fn set_honeypot(&self, value: impl Into<String>) {
        self.lock().honeypot = value.into();
    }

    pub fn email(&self) -> String {
        self.lock().email.clone()
    }

    pub fn status(&self) -> SignupStatus {
        self.lock().status.clone()
    }

    /// Submit the form once and return the resulting status.
    ///
    /// A no-op when the email field is empty or another submission is still
    /// in flight; otherwise exactly one request goes out. On success the
    /// email field is cleared; on failure it is kept so the user can retry,
    /// with the relay's message when it provided one.
    pub async fn submit(&self) -> SignupStatus {
        let (email, honeypot) = {
            let mut fields = self.lock();
            if fields.email.is_empty() || fields.status == SignupStatus::Submitting {
                return fields.status.clone();
            }
            fields.status = SignupStatus::Submitting;
            (fields.email.clone(), fields.honeypot.clone())
        };

        let result = self.client.subscribe(&email, &honeypot).await;

        let mut fields = self.lock();
        fields.status = match result {
            Ok(()) => {
                fields.email.clear();
                SignupStatus::Succeeded
            }
            Err(SignupError::Rejected(message)) => SignupStatus::Failed(message),
            Err(e @ SignupError::Unreachable(_)) => {
                tracing::warn!("Signup submission failed: {e:?}");
                SignupStatus::Failed(UNREACHABLE_MESSAGE.to_string())
            }
        };
        fields.status.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FormFields> {
        self.fields
            .lock()
            .expect("signup form state lock poisoned")
    }
}
