//! TUI front end for quickask: renders the chat widget's display area, question input, submit control and typing indicator in the terminal.

pub mod app;
pub mod components;
pub mod handlers;
pub mod logging;
pub mod state;
pub mod utils;

// Re-export main types for convenience
pub use app::App;
