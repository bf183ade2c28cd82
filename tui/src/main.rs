use anyhow::Result;
use quickask_core::{BackendFactory, ChatWidget, EventBus, WidgetConfig};
use quickask_tui::{logging, App};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // The alternate screen owns stdout and stderr, so logs go to a file
    let log_path = logging::init_file_logging()?;
    info!("Starting quickask TUI, logging to {}", log_path.display());

    let config = WidgetConfig::from_env()?;
    let backend = BackendFactory::from_config(&config)?;

    // Create event bus for communication
    let event_bus = EventBus::new();
    let widget = ChatWidget::new(backend, event_bus.sender(), &config);

    // Create and run the TUI application
    let mut app = App::new(widget, event_bus.into_receiver());
    app.run().await?;

    info!("quickask TUI shutting down");
    Ok(())
}
