use crate::reveal::DEFAULT_DELAY;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Widget settings: defaults, then environment, then explicit overrides
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// URL the question form is POSTed to
    pub endpoint: String,
    /// Pause between revealed characters
    pub reveal_delay: Duration,
    /// Give up on a request after this long; `None` waits forever
    pub request_timeout: Option<Duration>,
    /// Use the offline mock backend
    pub mock: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            reveal_delay: DEFAULT_DELAY,
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            mock: false,
        }
    }
}

impl WidgetConfig {
    /// Load from the process environment (after an optional `.env`).
    /// QUICKASK_ENDPOINT, QUICKASK_REVEAL_DELAY_MS, QUICKASK_TIMEOUT_SECS, QUICKASK_MOCK
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests need not touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("QUICKASK_ENDPOINT") {
            config = config.with_endpoint(endpoint)?;
        }
        if let Some(raw) = lookup("QUICKASK_REVEAL_DELAY_MS") {
            config.reveal_delay = Duration::from_millis(parse_number("QUICKASK_REVEAL_DELAY_MS", &raw)?);
        }
        if let Some(raw) = lookup("QUICKASK_TIMEOUT_SECS") {
            config = config.with_timeout_secs(parse_number("QUICKASK_TIMEOUT_SECS", &raw)?);
        }
        if let Some(raw) = lookup("QUICKASK_MOCK") {
            config.mock = matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }
        self.endpoint = endpoint;
        Ok(self)
    }

    pub fn with_reveal_delay_ms(mut self, ms: u64) -> Self {
        self.reveal_delay = Duration::from_millis(ms);
        self
    }

    /// Zero disables the timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }
}

fn parse_number(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("endpoint must be an http(s) URL, got {0:?}")]
    InvalidEndpoint(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = WidgetConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.reveal_delay, DEFAULT_DELAY);
        assert_eq!(DEFAULT_DELAY, Duration::from_millis(15));
    }

    #[test]
    fn test_environment_overrides() {
        let config = WidgetConfig::from_lookup(lookup_from(&[
            ("QUICKASK_ENDPOINT", "https://example.test/ask"),
            ("QUICKASK_REVEAL_DELAY_MS", "5"),
            ("QUICKASK_TIMEOUT_SECS", "0"),
            ("QUICKASK_MOCK", "true"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "https://example.test/ask");
        assert_eq!(config.reveal_delay, Duration::from_millis(5));
        assert_eq!(config.request_timeout, None);
        assert!(config.mock);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = WidgetConfig::from_lookup(lookup_from(&[("QUICKASK_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "QUICKASK_TIMEOUT_SECS", .. }));

        let err = WidgetConfig::default().with_endpoint("ftp://nope").unwrap_err();
        assert_eq!(err, ConfigError::InvalidEndpoint("ftp://nope".to_string()));
    }
}
