//! Environment configuration, read once at startup.

use thiserror::Error;

/// Environment variable holding the required API key.
pub const API_KEY_VAR: &str = "TAXBOT_API_KEY";

/// Environment variable overriding the service base URL.
pub const API_URL_VAR: &str = "TAXBOT_API_URL";

/// Default base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Startup configuration. Constructed once in `main` and handed to the
/// query client; nothing reads the environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var(API_KEY_VAR).ok(),
            std::env::var(API_URL_VAR).ok(),
        )
    }

    /// An empty key counts as missing, matching how an unset variable and
    /// `TAXBOT_API_KEY=""` behave identically in shell configs.
    fn from_vars(api_key: Option<String>, base_url: Option<String>) -> Result<Self, ConfigError> {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{API_KEY_VAR} environment variable is required")]
    MissingApiKey,
}
