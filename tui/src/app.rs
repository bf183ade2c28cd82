use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures_util::{Stream, StreamExt};
use quickask_core::{AppEvent, ChatWidget};
use ratatui::{backend::Backend, Frame, Terminal};
use std::{io, time::Duration};
use tokio::{sync::mpsc, time::MissedTickBehavior};
use tracing::{debug, info};

use crate::{
    components::{ChatComponent, InputComponent, StatusComponent},
    handlers::{EventHandler, InputHandler},
    state::AppState,
    utils::{layout, terminal},
};

/// Redraw cadence while nothing else happens; drives the cursor blink
const TICK_RATE: Duration = Duration::from_millis(100);

/// Main application
pub struct App {
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new(widget: ChatWidget, event_receiver: mpsc::UnboundedReceiver<AppEvent>) -> Self {
        Self {
            state: AppState::new(widget, event_receiver),
        }
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        let mut terminal = terminal::setup()?;

        info!("TUI initialized, starting main loop");

        // Main application loop
        let mut events = EventStream::new();
        let result = self.run_app(&mut terminal, &mut events).await;

        // Restore terminal
        terminal::restore(&mut terminal)?;

        let frames = result?;
        debug!("Main loop drew {} frames", frames);
        Ok(())
    }

    /// Main application loop; returns how many frames were drawn
    async fn run_app<B, S>(&mut self, terminal: &mut Terminal<B>, events: &mut S) -> Result<u64>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        let mut tick = tokio::time::interval(TICK_RATE);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut frames = 0;

        loop {
            // Update cursor blinking
            self.state.update_cursor_blink();

            // Draw UI
            terminal.draw(|f| self.ui(f))?;
            frames += 1;

            tokio::select! {
                // Handle terminal events (keyboard input)
                terminal_event = events.next() => match terminal_event {
                    Some(Ok(event)) => InputHandler::handle_event(&mut self.state, event),
                    Some(Err(err)) => return Err(err.into()),
                    // Terminal input is gone
                    None => self.state.should_quit = true,
                },

                // Handle widget events (answers, reveal steps)
                app_event = self.state.event_receiver.recv() => {
                    if let Some(event) = app_event {
                        EventHandler::handle_event(&mut self.state, event);
                    }
                },

                _ = tick.tick() => {},
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(frames)
    }

    /// Draw the user interface
    fn ui(&mut self, f: &mut Frame) {
        let chunks = layout::create_main_layout(f.size());

        ChatComponent::render(&mut self.state, f, chunks[0]);
        InputComponent::render(&self.state, f, chunks[1]);
        StatusComponent::render(&self.state, f, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use quickask_core::{BackendFactory, EventBus, WidgetConfig};
    use ratatui::backend::TestBackend;

    fn mock_app() -> App {
        let config = WidgetConfig { mock: true, ..WidgetConfig::default() };
        let backend = BackendFactory::from_config(&config).unwrap();
        let bus = EventBus::new();
        let widget = ChatWidget::new(backend, bus.sender(), &config);
        App::new(widget, bus.into_receiver())
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_loop_redraws_at_tick_rate() {
        let mut app = mock_app();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        let quit = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let mut events = Box::pin(futures_util::stream::once(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok::<_, io::Error>(quit)
        }));

        let frames = app.run_app(&mut terminal, &mut events).await.unwrap();

        assert!(app.state.should_quit);
        assert!(frames <= 15, "drew {} frames in one idle second", frames);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_input_stream_quits() {
        let mut app = mock_app();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut events = futures_util::stream::empty::<io::Result<Event>>();

        let frames = app.run_app(&mut terminal, &mut events).await.unwrap();

        assert!(app.state.should_quit);
        // The first tick is ready at once and may win the race
        assert!(frames <= 2);
    }
}
