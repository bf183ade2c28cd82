use anyhow::{bail, Result};
use clap::Parser;
use quickask_core::{
    reveal_text, widget::ERROR_MESSAGE, Backend, BackendFactory, ChatWidget, EventBus, Question,
    RevealTarget, WidgetConfig,
};
use quickask_tui::logging;
use std::{
    io::{self, Write},
    time::Duration,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quickask")]
#[command(about = "Ask a question and watch the answer type itself out")]
struct Cli {
    /// Ask once on stdout instead of opening the TUI
    question: Vec<String>,

    /// Backend URL the question is POSTed to
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Milliseconds between revealed characters
    #[arg(short, long)]
    delay_ms: Option<u64>,

    /// Request timeout in seconds (0 waits forever)
    #[arg(short, long)]
    timeout_secs: Option<u64>,

    /// Answer from the offline mock backend
    #[arg(long)]
    mock: bool,
}

impl Cli {
    /// Environment first, then flags on top
    fn config(&self) -> Result<WidgetConfig> {
        self.apply_to(WidgetConfig::from_env()?)
    }

    /// Override `config` with whichever flags were given
    fn apply_to(&self, mut config: WidgetConfig) -> Result<WidgetConfig> {
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone())?;
        }
        if let Some(ms) = self.delay_ms {
            config = config.with_reveal_delay_ms(ms);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        config.mock |= self.mock;
        Ok(config)
    }
}

/// Writes revealed characters straight through to `out`
struct WriterTarget<'a, W> {
    out: &'a mut W,
}

impl<W: Write> RevealTarget for WriterTarget<'_, W> {
    fn clear(&mut self) {}

    fn push_char(&mut self, ch: char) {
        let _ = write!(self.out, "{}", ch);
    }

    fn scroll_to_bottom(&mut self) {
        let _ = self.out.flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.question.is_empty() {
        // Headless: stdout carries the answer, logs stay on stderr
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with_writer(io::stderr)
            .init();

        let config = cli.config()?;
        let backend = BackendFactory::from_config(&config)?;
        let mut stdout = io::stdout();
        return ask_once(&cli.question.join(" "), config.reveal_delay, backend.as_ref(), &mut stdout).await;
    }

    let log_path = logging::init_file_logging()?;
    info!("Starting quickask, logging to {}", log_path.display());

    let config = cli.config()?;
    let backend = BackendFactory::from_config(&config)?;
    let event_bus = EventBus::new();
    let widget = ChatWidget::new(backend, event_bus.sender(), &config);
    let mut app = quickask_tui::App::new(widget, event_bus.into_receiver());
    app.run().await?;

    info!("quickask shutting down");
    Ok(())
}

/// One headless submit cycle: question line, then the revealed answer or the error message
async fn ask_once<W: Write + Send>(
    raw: &str,
    delay: Duration,
    backend: &dyn Backend,
    out: &mut W,
) -> Result<()> {
    let Some(question) = Question::parse(raw) else {
        bail!("question is empty");
    };
    writeln!(out, "Q: {}", question)?;

    match backend.ask(&question).await {
        Ok(answer) => {
            let mut target = WriterTarget { out: &mut *out };
            reveal_text(&mut target, answer.as_str(), delay, None).await;
            writeln!(out)?;
            Ok(())
        }
        Err(failure) => {
            error!("Error: {}", failure);
            writeln!(out, "{}", ERROR_MESSAGE)?;
            bail!(failure)
        }
    }
}
