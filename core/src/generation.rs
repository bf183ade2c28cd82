use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonically increasing tag shared between the widget and the tasks it
/// spawns. A task holding an older value knows its work has been superseded.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: Arc<AtomicU64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation and return its tag.
    pub fn advance(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, tag: u64) -> bool {
        self.current() == tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_invalidates_older_tags() {
        let generation = Generation::new();
        let first = generation.advance();
        let shared = generation.clone();
        let second = shared.advance();

        assert!(second > first);
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
