// UI components for the TUI

pub mod chat;
pub mod input;
pub mod status;

pub use chat::ChatComponent;
pub use input::InputComponent;
pub use status::StatusComponent;
