use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

/// Retrieve the configuration for the application.
///
/// Values are read from `configuration.yaml` and can be overridden through
/// `APP_`-prefixed environment variables, e.g. `APP_MAILING_LIST__API_KEY`.
/// The mailing-list credentials are expected to arrive this way.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    Config::builder()
        .add_source(File::new("configuration.yaml", FileFormat::Yaml))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}

#[derive(Debug, serde::Deserialize, Getters)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub mailing_list: MailingListSettings,
}

#[derive(Debug, serde::Deserialize, Getters)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Connection details for the external mailing-list provider.
///
/// Every field defaults to empty: missing credentials must not prevent the
/// application from starting. The outbound call simply fails at request time
/// and the relay reports it as a server error.
#[derive(Debug, serde::Deserialize, Getters)]
pub struct MailingListSettings {
    /// Provider datacenter prefix, e.g. `us21`.
    #[serde(default)]
    pub server_prefix: String,
    /// Identifier of the audience (list) new members are added to.
    #[serde(default)]
    pub audience_id: String,
    #[serde(default = "empty_secret")]
    pub api_key: Secret<String>,
    /// Overrides the derived provider base URL. Used by the test suite to
    /// point the client at a local stand-in.
    #[serde(default)]
    pub api_base: Option<String>,
}

impl MailingListSettings {
    /// The "add member" endpoint for the configured audience.
    pub fn members_url(&self) -> String {
        let base = match &self.api_base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.mailchimp.com/3.0", self.server_prefix),
        };
        format!("{base}/lists/{}/members", self.audience_id)
    }
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}
