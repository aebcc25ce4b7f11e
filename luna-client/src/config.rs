//! Client configuration.

use crate::error::{ClientError, ClientResult};
use std::time::Duration;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_MODEL: &str = "luna-small";

/// Configuration for a [`LunaClient`](crate::LunaClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the device; defaults to a local device when unset.
    pub base_url: Option<Url>,
    /// Model name sent with every request.
    pub model: String,
    /// Request timeout. Covers the whole streamed response.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(300),
        }
    }
}

impl ClientConfig {
    /// Create a config with defaults for a local device.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from `LUNA_BASE_URL` and `LUNA_MODEL`.
    ///
    /// Unset variables fall back to the defaults; a malformed
    /// `LUNA_BASE_URL` is a configuration error.
    pub fn from_env() -> ClientResult<Self> {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("LUNA_BASE_URL") {
            let parsed = Url::parse(&base_url).map_err(|e| {
                ClientError::Configuration(format!("invalid LUNA_BASE_URL {base_url:?}: {e}"))
            })?;
            config.base_url = Some(parsed);
        }
        if let Ok(model) = std::env::var("LUNA_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// Set the base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the model name.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The effective base URL as a string, without a trailing slash.
    #[must_use]
    pub fn effective_base_url(&self) -> String {
        self.base_url
            .as_ref()
            .map_or(DEFAULT_BASE_URL, Url::as_str)
            .trim_end_matches('/')
            .to_string()
    }

    /// The chat completions endpoint for this config.
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.effective_base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.model, "luna-small");
        assert_eq!(
            config.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_completions_url_no_double_slash() {
        let config =
            ClientConfig::default().base_url(Url::parse("http://10.0.0.5:8080/").unwrap());
        assert_eq!(
            config.completions_url(),
            "http://10.0.0.5:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new()
            .model("luna-large")
            .timeout(Duration::from_secs(30));
        assert_eq!(config.model, "luna-large");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
