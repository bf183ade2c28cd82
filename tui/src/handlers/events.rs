use quickask_core::AppEvent;
use tracing::debug;
use crate::state::AppState;

/// Handles events coming off the bus
pub struct EventHandler;

impl EventHandler {
    /// Handle application events
    pub fn handle_event(state: &mut AppState, event: AppEvent) {
        match event {
            AppEvent::RevealAppend { .. } | AppEvent::RevealScroll { .. } => {
                state.widget.apply(event);
            }
            event => {
                debug!("Handling app event: {:?}", event);
                state.widget.apply(event);
            }
        }
    }
}
