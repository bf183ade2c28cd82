use super::{Answer, Backend, BackendInfo, Question, RequestFailed};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Backend reached over HTTP with a single form POST per question
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpBackend {
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Result<Self, RequestFailed> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RequestFailed::new(format!("client setup error: {}", e)))?;
        Ok(Self { client, endpoint, timeout })
    }

    async fn http_post(&self, question: &Question) -> Result<Value, RequestFailed> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(question.form_body())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !resp.status().is_success() {
            return Err(RequestFailed::status(resp.status().as_u16()));
        }

        let text = resp.text().await.map_err(|e| self.map_send_error(e))?;
        serde_json::from_str(&text).map_err(RequestFailed::decode)
    }

    fn map_send_error(&self, err: reqwest::Error) -> RequestFailed {
        match self.timeout {
            Some(after) if err.is_timeout() => RequestFailed::timeout(after),
            _ => RequestFailed::network(err),
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn ask(&self, question: &Question) -> Result<Answer, RequestFailed> {
        debug!("POST {} ({} chars)", self.endpoint, question.as_str().len());
        let payload = self.http_post(question).await?;
        Ok(Answer::from_payload(&payload))
    }

    fn info(&self) -> BackendInfo {
        BackendInfo {
            name: "HTTP Backend".to_string(),
            endpoint: self.endpoint.clone(),
        }
    }
}
