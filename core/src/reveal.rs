//! Character-by-character reveal of answer text.
//!
//! The reveal is an explicit state object advanced one character per tick.
//! [`reveal_text`] drives it with a timer; the widget feeds the same steps
//! through the event bus so the UI loop stays responsive between characters.

use crate::generation::Generation;
use std::time::Duration;

/// Default pause between revealed characters
pub const DEFAULT_DELAY: Duration = Duration::from_millis(15);

/// Something a reveal writes into
pub trait RevealTarget {
    /// Drop whatever the target currently shows
    fn clear(&mut self);

    /// Append one character
    fn push_char(&mut self, ch: char);

    /// Keep the newest content in view
    fn scroll_to_bottom(&mut self);
}

impl RevealTarget for String {
    fn clear(&mut self) {
        String::clear(self);
    }

    fn push_char(&mut self, ch: char) {
        self.push(ch);
    }

    fn scroll_to_bottom(&mut self) {}
}

/// Result of advancing a reveal by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    Appended(char),
    Done,
}

/// How a driven reveal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Every character was appended
    Completed,
    /// A newer generation started before the text was fully revealed
    Superseded,
}

/// Cursor into the text being revealed
#[derive(Debug, Clone)]
pub struct Reveal {
    chars: Vec<char>,
    position: usize,
}

impl Reveal {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            position: 0,
        }
    }

    /// Reset the target and rewind to the first character.
    pub fn start<T: RevealTarget + ?Sized>(&mut self, target: &mut T) {
        self.position = 0;
        target.clear();
    }

    /// Append the next character and scroll, or report completion.
    pub fn advance<T: RevealTarget + ?Sized>(&mut self, target: &mut T) -> RevealStep {
        let Some(&ch) = self.chars.get(self.position) else {
            return RevealStep::Done;
        };
        self.position += 1;
        target.push_char(ch);
        target.scroll_to_bottom();
        RevealStep::Appended(ch)
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.chars.len()
    }
}

/// Stops a driven reveal once its generation is no longer current
#[derive(Debug, Clone)]
pub struct RevealGuard {
    generation: Generation,
    tag: u64,
}

impl RevealGuard {
    pub fn new(generation: Generation, tag: u64) -> Self {
        Self { generation, tag }
    }

    pub fn is_stale(&self) -> bool {
        !self.generation.is_current(self.tag)
    }
}

/// Clear `target`, then append `text` one character at a time with `delay`
/// between characters. Empty text completes without sleeping. With a guard,
/// the reveal stops as soon as its generation is superseded.
pub async fn reveal_text<T>(
    target: &mut T,
    text: &str,
    delay: Duration,
    guard: Option<RevealGuard>,
) -> RevealOutcome
where
    T: RevealTarget + Send + ?Sized,
{
    let mut reveal = Reveal::new(text);
    reveal.start(target);

    while !reveal.is_complete() {
        if guard.as_ref().is_some_and(RevealGuard::is_stale) {
            return RevealOutcome::Superseded;
        }
        reveal.advance(target);
        tokio::time::sleep(delay).await;
    }

    RevealOutcome::Completed
}
