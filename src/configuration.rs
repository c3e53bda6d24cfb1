//! Credential and instance configuration for the dcimcli client.
//!
//! The client is configured entirely through environment variables: the
//! OAuth2 client credentials and the base URL of the monitoring instance.
//! Values are validated here, before any network call is made.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const ENV_CLIENT_ID: &str = "CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const ENV_INSTANCE_URL: &str = "INSTANCE_URL";

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("missing value for required setting {name:?}")]
    MissingRequiredValue { name: String },
    #[error("invalid instance URL: {0}")]
    InvalidInstanceUrl(#[from] url::ParseError),
}

/// Client credentials and instance location for one run.
///
/// Immutable for the lifetime of the run; every component receives it (or a
/// value derived from it) explicitly rather than reading ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    instance_url: Url,
}

impl Credentials {
    pub fn new(
        client_id: String,
        client_secret: String,
        instance_url: Url,
    ) -> Result<Credentials, ConfigurationError> {
        if client_id.is_empty() {
            return Err(ConfigurationError::MissingRequiredValue {
                name: ENV_CLIENT_ID.to_string(),
            });
        }
        if client_secret.is_empty() {
            return Err(ConfigurationError::MissingRequiredValue {
                name: ENV_CLIENT_SECRET.to_string(),
            });
        }

        Ok(Credentials {
            client_id,
            client_secret,
            instance_url,
        })
    }

    /// Load credentials from the process environment.
    pub fn from_env() -> Result<Credentials, ConfigurationError> {
        Credentials::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an injected lookup function.
    ///
    /// `from_env` delegates here; tests supply their own lookup instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Credentials, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = required_value(&lookup, ENV_CLIENT_ID)?;
        let client_secret = required_value(&lookup, ENV_CLIENT_SECRET)?;
        let instance_url = required_value(&lookup, ENV_INSTANCE_URL)?;
        let instance_url = Url::parse(&instance_url)?;

        debug!("Configured for instance {}", instance_url);

        Credentials::new(client_id, client_secret, instance_url)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn instance_url(&self) -> &Url {
        &self.instance_url
    }

    /// Base URL as a string without a trailing slash, suitable for joining
    /// with endpoint paths.
    pub fn base_url(&self) -> String {
        self.instance_url.as_str().trim_end_matches('/').to_string()
    }
}

fn required_value<F>(lookup: &F, name: &str) -> Result<String, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigurationError::MissingRequiredValue {
            name: name.to_string(),
        }),
    }
}
