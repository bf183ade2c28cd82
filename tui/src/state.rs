use quickask_core::{AppEvent, ChatWidget};
use std::time::Instant;
use tokio::sync::mpsc;

/// Application state
pub struct AppState {
    /// The chat widget and all of its UI handles
    pub widget: ChatWidget,

    /// Whether the application should quit
    pub should_quit: bool,

    /// Event receiver for handling app events
    pub event_receiver: mpsc::UnboundedReceiver<AppEvent>,

    /// Display scroll position when not following the tail
    pub chat_scroll: usize,

    /// Whether cursor is visible (for blinking effect)
    pub cursor_visible: bool,

    /// Last time cursor blinked
    pub last_cursor_blink: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(widget: ChatWidget, event_receiver: mpsc::UnboundedReceiver<AppEvent>) -> Self {
        Self {
            widget,
            should_quit: false,
            event_receiver,
            chat_scroll: 0,
            cursor_visible: true,
            last_cursor_blink: Instant::now(),
        }
    }

    /// Whether keyboard focus is on the question input
    pub fn input_focused(&self) -> bool {
        self.widget.input.focused
    }

    /// Update cursor blinking state
    pub fn update_cursor_blink(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_cursor_blink).as_millis() >= 500 {
            self.cursor_visible = !self.cursor_visible;
            self.last_cursor_blink = now;
        }
    }
}
