use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::WidgetConfig;

pub mod http;
pub mod mock;

pub use http::HttpBackend;
pub use mock::MockBackend;

/// Shown when the response payload carries no usable `answer`.
pub const FALLBACK_ANSWER: &str = "Sorry, I could not get a response.";

/// Backend that turns a question into an answer
#[async_trait]
pub trait Backend: Send + Sync {
    /// Send the question and wait for the answer
    async fn ask(&self, question: &Question) -> Result<Answer, RequestFailed>;

    /// Get backend information
    fn info(&self) -> BackendInfo;
}

/// A trimmed, non-empty question typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Form body sent to the backend, percent-encoded with `%20` for spaces.
    pub fn form_body(&self) -> String {
        format!("question={}", urlencoding::encode(&self.0))
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answer text extracted from a backend response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer(String);

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn fallback() -> Self {
        Self(FALLBACK_ANSWER.to_string())
    }

    /// Pull `answer` out of a response payload. Anything other than a
    /// non-empty string falls back.
    pub fn from_payload(payload: &Value) -> Self {
        match payload.get("answer").and_then(Value::as_str) {
            Some(text) if !text.is_empty() => Self(text.to_string()),
            _ => Self::fallback(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Information about a backend
#[derive(Debug, Clone)]
pub struct BackendInfo {
    pub name: String,
    pub endpoint: String,
}

/// The one failure kind a question can end in. Network errors, bad status
/// codes, timeouts and undecodable bodies all collapse into it; the cause is
/// kept for logs only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("request failed: {cause}")]
pub struct RequestFailed {
    cause: String,
}

impl RequestFailed {
    pub fn new(cause: impl Into<String>) -> Self {
        Self { cause: cause.into() }
    }

    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::new(format!("network error: {}", err))
    }

    pub fn status(code: u16) -> Self {
        Self::new(format!("server responded with status {}", code))
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::new(format!("decode error: {}", err))
    }

    pub fn timeout(after: Duration) -> Self {
        Self::new(format!("no response after {:?}", after))
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }
}

/// Factory for creating backends from configuration
pub struct BackendFactory;

impl BackendFactory {
    /// Offline mock when `config.mock` is set, otherwise the HTTP backend.
    pub fn from_config(config: &WidgetConfig) -> Result<Arc<dyn Backend>, RequestFailed> {
        if config.mock {
            return Ok(Arc::new(MockBackend::new()));
        }
        let backend = HttpBackend::new(config.endpoint.clone(), config.request_timeout)?;
        Ok(Arc::new(backend))
    }
}
