pub mod backend;
pub mod config;
pub mod events;
pub mod generation;
pub mod reveal;
pub mod widget;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use backend::{Answer, Backend, BackendFactory, BackendInfo, Question, RequestFailed};
pub use config::{ConfigError, WidgetConfig};
pub use events::{AppEvent, EventBus, EventSender};
pub use generation::Generation;
pub use reveal::{reveal_text, Reveal, RevealOutcome, RevealTarget};
pub use widget::{ChatWidget, Display, DisplayNode, NodeKind, SubmitControl};
