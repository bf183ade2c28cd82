use crate::backend::{Answer, Backend, BackendInfo, Question, RequestFailed};
use crate::config::WidgetConfig;
use crate::events::{AppEvent, EventSender};
use crate::generation::Generation;
use crate::reveal::{reveal_text, RevealGuard, RevealOutcome, RevealTarget};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Submit control label while idle
pub const ASK_LABEL: &str = "Ask";
/// Submit control label while a question is in flight
pub const BUSY_LABEL: &str = "Thinking...";
/// Shown in place of an answer when the request fails
pub const ERROR_MESSAGE: &str = "❌ Error: Could not connect to server.";

/// What a line in the display area holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Question,
    Answer,
    Error,
}

/// One line in the display area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
    pub kind: NodeKind,
    pub text: String,
}

impl DisplayNode {
    pub fn question(question: &Question) -> Self {
        Self { kind: NodeKind::Question, text: question.as_str().to_string() }
    }

    pub fn answer() -> Self {
        Self { kind: NodeKind::Answer, text: String::new() }
    }

    pub fn error(message: &str) -> Self {
        Self { kind: NodeKind::Error, text: message.to_string() }
    }

    /// Text as it reads on screen
    pub fn formatted_content(&self) -> String {
        match self.kind {
            NodeKind::Question => format!("Q: {}", self.text),
            NodeKind::Answer | NodeKind::Error => self.text.clone(),
        }
    }
}

/// The display area: the current question/answer pair
#[derive(Debug, Clone, Default)]
pub struct Display {
    nodes: Vec<DisplayNode>,
    follow_tail: bool,
}

impl Display {
    pub fn nodes(&self) -> &[DisplayNode] {
        &self.nodes
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Append a node and return its index
    pub fn push(&mut self, node: DisplayNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn node_mut(&mut self, index: usize) -> Option<&mut DisplayNode> {
        self.nodes.get_mut(index)
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow_tail = true;
    }

    /// The user scrolled away from the bottom
    pub fn release_tail(&mut self) {
        self.follow_tail = false;
    }

    pub fn follows_tail(&self) -> bool {
        self.follow_tail
    }

    /// Whole display as plain text, one node per line
    pub fn text(&self) -> String {
        self.nodes
            .iter()
            .map(DisplayNode::formatted_content)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The submit affordance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl SubmitControl {
    fn idle() -> Self {
        Self { enabled: true, label: ASK_LABEL }
    }

    fn busy() -> Self {
        Self { enabled: false, label: BUSY_LABEL }
    }
}

/// The question input field. `cursor` is a byte index on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct QuestionInput {
    pub text: String,
    pub cursor: usize,
    pub focused: bool,
}

impl QuestionInput {
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

/// The chat widget: owns every UI handle and runs the submit cycle
pub struct ChatWidget {
    display: Display,
    pub input: QuestionInput,
    submit: SubmitControl,
    typing_indicator: bool,
    backend: Arc<dyn Backend>,
    event_sender: EventSender,
    generation: Generation,
    reveal_delay: Duration,
    /// Index of the answer node the active reveal writes into
    answer_node: Option<usize>,
    reveal_task: Option<JoinHandle<()>>,
}

impl ChatWidget {
    /// Create a widget; the input starts focused.
    pub fn new(backend: Arc<dyn Backend>, event_sender: EventSender, config: &WidgetConfig) -> Self {
        let mut widget = Self {
            display: Display::default(),
            input: QuestionInput::default(),
            submit: SubmitControl::idle(),
            typing_indicator: false,
            backend,
            event_sender,
            generation: Generation::new(),
            reveal_delay: config.reveal_delay,
            answer_node: None,
            reveal_task: None,
        };
        widget.focus_input();
        widget
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn typing_indicator_visible(&self) -> bool {
        self.typing_indicator
    }

    /// Whether a submit cycle is running
    pub fn is_busy(&self) -> bool {
        !self.submit.enabled
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.current()
    }

    pub fn backend_info(&self) -> BackendInfo {
        self.backend.info()
    }

    pub fn focus_input(&mut self) {
        self.input.focused = true;
    }

    /// Submit whatever is in the input field
    pub fn submit_input(&mut self) -> bool {
        let raw = self.input.text.clone();
        self.submit_question(&raw)
    }

    /// Start a submit cycle. Returns `false` without touching anything when
    /// the trimmed input is empty or a cycle is already running.
    pub fn submit_question(&mut self, raw: &str) -> bool {
        if self.is_busy() {
            debug!("Ignoring submit while a question is in flight");
            return false;
        }
        let Some(question) = Question::parse(raw) else {
            return false;
        };

        let generation = self.generation.advance();
        self.stop_reveal();

        self.display.clear();
        self.display.push(DisplayNode::question(&question));
        self.input.clear();
        self.submit = SubmitControl::busy();
        self.typing_indicator = true;

        info!("Submitting question (generation {})", generation);
        let backend = self.backend.clone();
        let sender = self.event_sender.clone();
        tokio::spawn(async move {
            let outcome = backend.ask(&question).await;
            let _ = sender.send_request_outcome(generation, outcome);
        });

        true
    }

    /// Apply a bus event produced by a submit cycle
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::AnswerReceived { generation, answer } => self.apply_answer(generation, answer),
            AppEvent::RequestFailed { generation, error } => self.apply_failure(generation, error),
            AppEvent::RevealCleared { generation } => self.clear_revealed(generation),
            AppEvent::RevealAppend { generation, ch } => self.append_revealed(generation, ch),
            AppEvent::RevealScroll { generation } => {
                if self.generation.is_current(generation) {
                    self.display.scroll_to_bottom();
                }
            }
            AppEvent::RevealFinished { generation } => self.finish_reveal(generation),
        }
    }

    /// The backend answered: show an empty answer line and start revealing.
    pub fn apply_answer(&mut self, generation: u64, answer: Answer) {
        if !self.awaiting_response(generation) {
            debug!("Dropping answer for generation {}", generation);
            return;
        }
        self.typing_indicator = false;
        self.answer_node = Some(self.display.push(DisplayNode::answer()));

        let text = answer.into_string();
        if text.is_empty() {
            self.finish_reveal(generation);
            return;
        }

        let guard = RevealGuard::new(self.generation.clone(), generation);
        let sender = self.event_sender.clone();
        let delay = self.reveal_delay;
        self.reveal_task = Some(tokio::spawn(async move {
            let mut target = BusTarget { sender: sender.clone(), generation };
            if reveal_text(&mut target, &text, delay, Some(guard)).await == RevealOutcome::Completed {
                let _ = sender.send(AppEvent::RevealFinished { generation });
            }
        }));
    }

    /// The request failed: log the cause, show the fixed message, re-enable.
    pub fn apply_failure(&mut self, generation: u64, failure: RequestFailed) {
        if !self.awaiting_response(generation) {
            debug!("Dropping failure for generation {}", generation);
            return;
        }
        error!("Error: {}", failure);
        self.typing_indicator = false;
        self.display.push(DisplayNode::error(ERROR_MESSAGE));
        self.finish_cycle();
    }

    pub fn clear_revealed(&mut self, generation: u64) {
        if let Some(node) = self.revealing_node(generation) {
            node.text.clear();
            self.display.scroll_to_bottom();
        }
    }

    pub fn append_revealed(&mut self, generation: u64, ch: char) {
        if let Some(node) = self.revealing_node(generation) {
            node.text.push(ch);
            self.display.scroll_to_bottom();
        }
    }

    /// The reveal is done; closes the cycle.
    pub fn finish_reveal(&mut self, generation: u64) {
        if !self.generation.is_current(generation) {
            return;
        }
        self.answer_node = None;
        self.reveal_task = None;
        self.finish_cycle();
    }

    /// Re-enable the submit control and stick to the bottom. Runs at the end
    /// of every cycle whatever the outcome.
    pub fn finish_cycle(&mut self) {
        self.submit = SubmitControl::idle();
        self.display.scroll_to_bottom();
    }

    fn awaiting_response(&self, generation: u64) -> bool {
        self.generation.is_current(generation) && self.typing_indicator
    }

    fn revealing_node(&mut self, generation: u64) -> Option<&mut DisplayNode> {
        if !self.generation.is_current(generation) {
            return None;
        }
        let index = self.answer_node?;
        self.display.node_mut(index)
    }

    fn stop_reveal(&mut self) {
        if let Some(task) = self.reveal_task.take() {
            task.abort();
        }
        self.answer_node = None;
    }
}

impl Drop for ChatWidget {
    fn drop(&mut self) {
        self.stop_reveal();
    }
}

/// Reveal target that forwards each step to the widget over the event bus
struct BusTarget {
    sender: EventSender,
    generation: u64,
}

impl RevealTarget for BusTarget {
    fn clear(&mut self) {
        let _ = self.sender.send(AppEvent::RevealCleared { generation: self.generation });
    }

    fn push_char(&mut self, ch: char) {
        let _ = self.sender.send(AppEvent::RevealAppend { generation: self.generation, ch });
    }

    fn scroll_to_bottom(&mut self) {
        let _ = self.sender.send(AppEvent::RevealScroll { generation: self.generation });
    }
}
