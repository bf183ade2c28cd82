use crate::backend::{Answer, RequestFailed};
use tokio::sync::mpsc;

/// Events that flow through the application. Everything produced by a
/// submit cycle carries the generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The backend answered
    AnswerReceived { generation: u64, answer: Answer },

    /// The request could not be completed
    RequestFailed { generation: u64, error: RequestFailed },

    /// The reveal cleared its target
    RevealCleared { generation: u64 },

    /// The reveal appended one character
    RevealAppend { generation: u64, ch: char },

    /// The reveal asked for the display to stick to the bottom
    RevealScroll { generation: u64 },

    /// The reveal appended its last character
    RevealFinished { generation: u64 },
}

/// Event bus for communication between components
#[derive(Debug)]
pub struct EventBus {
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Get a sender handle for the event bus
    pub fn sender(&self) -> EventSender {
        EventSender {
            inner: self.sender.clone(),
        }
    }

    /// Get the receiver (should only be used by the main event loop)
    pub fn into_receiver(self) -> mpsc::UnboundedReceiver<AppEvent> {
        self.receiver
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for sending events to the event bus
#[derive(Debug, Clone)]
pub struct EventSender {
    inner: mpsc::UnboundedSender<AppEvent>,
}

impl EventSender {
    /// Send an event to the bus
    pub fn send(&self, event: AppEvent) -> Result<(), EventSendError> {
        self.inner
            .send(event)
            .map_err(|_| EventSendError::ChannelClosed)
    }

    /// Send the outcome of a request
    pub fn send_request_outcome(
        &self,
        generation: u64,
        outcome: Result<Answer, RequestFailed>,
    ) -> Result<(), EventSendError> {
        match outcome {
            Ok(answer) => self.send(AppEvent::AnswerReceived { generation, answer }),
            Err(error) => self.send(AppEvent::RequestFailed { generation, error }),
        }
    }
}

/// Errors that can occur when sending events
#[derive(Debug, thiserror::Error)]
pub enum EventSendError {
    #[error("Event channel is closed")]
    ChannelClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let mut receiver = bus.into_receiver();

        sender
            .send_request_outcome(3, Ok(Answer::new("4")))
            .unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(
            event,
            AppEvent::AnswerReceived { generation: 3, answer: Answer::new("4") }
        );
    }

    #[tokio::test]
    async fn test_send_after_receiver_dropped() {
        let bus = EventBus::new();
        let sender = bus.sender();
        drop(bus.into_receiver());

        let result = sender.send(AppEvent::RevealFinished { generation: 1 });
        assert!(matches!(result, Err(EventSendError::ChannelClosed)));
    }
}
