use super::{Answer, Backend, BackendInfo, Question, RequestFailed};
use async_trait::async_trait;
use std::time::Duration;

/// Offline backend that echoes the question back after a simulated delay
pub struct MockBackend {
    delay: Duration,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(300), // Simulate server latency
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn ask(&self, question: &Question) -> Result<Answer, RequestFailed> {
        tokio::time::sleep(self.delay).await;

        if question.as_str().eq_ignore_ascii_case("error") {
            return Err(RequestFailed::network("simulated connection failure"));
        }

        Ok(Answer::new(format!("You asked: {}", question)))
    }

    fn info(&self) -> BackendInfo {
        BackendInfo {
            name: "Mock Backend".to_string(),
            endpoint: "offline".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend_echo() {
        let backend = MockBackend::new().with_delay(Duration::from_millis(10));
        let question = Question::parse("Hello, world!").unwrap();
        let answer = backend.ask(&question).await.unwrap();

        assert_eq!(answer.as_str(), "You asked: Hello, world!");
    }

    #[tokio::test]
    async fn test_mock_backend_error() {
        let backend = MockBackend::new().with_delay(Duration::from_millis(10));
        let question = Question::parse("error").unwrap();
        let result = backend.ask(&question).await;

        assert!(result.unwrap_err().cause().contains("simulated"));
    }
}
