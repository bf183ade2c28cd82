pub mod http_backend_tests;

// Test utilities
use crate::backend::{Answer, Backend, BackendInfo, Question, RequestFailed};
use crate::config::WidgetConfig;
use crate::events::{AppEvent, EventBus};
use crate::widget::ChatWidget;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Backend that records every question and replies with a canned outcome
pub struct RecordingBackend {
    pub questions: Mutex<Vec<String>>,
    outcome: Result<Answer, RequestFailed>,
}

impl RecordingBackend {
    pub fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self {
            questions: Mutex::new(Vec::new()),
            outcome: Ok(Answer::new(text)),
        })
    }

    pub fn failing(cause: &str) -> Arc<Self> {
        Arc::new(Self {
            questions: Mutex::new(Vec::new()),
            outcome: Err(RequestFailed::network(cause)),
        })
    }

    pub fn asked(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn ask(&self, question: &Question) -> Result<Answer, RequestFailed> {
        self.questions.lock().unwrap().push(question.as_str().to_string());
        self.outcome.clone()
    }

    fn info(&self) -> BackendInfo {
        BackendInfo {
            name: "Recording Backend".to_string(),
            endpoint: "memory".to_string(),
        }
    }
}

/// Test helper to build a widget with a fast reveal
pub fn setup_widget(backend: Arc<dyn Backend>) -> (ChatWidget, mpsc::UnboundedReceiver<AppEvent>) {
    let bus = EventBus::new();
    let config = WidgetConfig::default().with_reveal_delay_ms(1);
    let widget = ChatWidget::new(backend, bus.sender(), &config);
    (widget, bus.into_receiver())
}

/// Test helper to feed bus events into the widget until the cycle closes
pub async fn drive_until_idle(
    widget: &mut ChatWidget,
    receiver: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while widget.is_busy() {
        let event = tokio::time::timeout(Duration::from_secs(5), receiver.recv())
            .await
            .expect("timed out waiting for widget event")
            .expect("event bus closed");
        events.push(event.clone());
        widget.apply(event);
    }
    events
}
