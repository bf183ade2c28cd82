/// Utility functions for the TUI application

/// Terminal management utilities
pub mod terminal {
    use anyhow::Result;
    use crossterm::{
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        event::{DisableMouseCapture, EnableMouseCapture},
    };
    use ratatui::{backend::CrosstermBackend, Terminal};
    use std::io;

    /// Setup terminal for TUI mode
    pub fn setup() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore terminal to normal mode
    pub fn restore<B: ratatui::backend::Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}

/// Layout calculation utilities
pub mod layout {
    use ratatui::layout::{Constraint, Direction, Layout, Rect};

    /// Display area, question input, status line
    pub fn create_main_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),     // Display area
                Constraint::Length(3),  // Question input
                Constraint::Length(1),  // Status line
            ].as_ref())
            .split(area)
            .to_vec()
    }
}

/// Text helpers shared by components
pub mod text {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    /// Word-wrap `content` to `width` terminal columns; words longer than a line are split.
    pub fn wrap(content: &str, width: usize) -> Vec<String> {
        if width == 0 {
            return vec![content.to_string()];
        }

        let mut lines = Vec::new();
        for paragraph in content.split('\n') {
            let mut current = String::new();
            let mut current_width = 0;

            for word in paragraph.split(' ') {
                let word_width = word.width();
                if current_width > 0 && current_width + 1 + word_width <= width {
                    current.push(' ');
                    current.push_str(word);
                    current_width += 1 + word_width;
                    continue;
                }
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                }
                current.clear();
                current_width = 0;
                for ch in word.chars() {
                    let ch_width = ch.width().unwrap_or(0);
                    if current_width > 0 && current_width + ch_width > width {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += ch_width;
                }
            }
            lines.push(current);
        }
        lines
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_wrap_breaks_on_words() {
            assert_eq!(wrap("the quick brown fox", 9), vec!["the quick", "brown fox"]);
        }

        #[test]
        fn test_wrap_splits_long_words_and_keeps_newlines() {
            assert_eq!(wrap("abcdefgh\nxy", 3), vec!["abc", "def", "gh", "xy"]);
        }

        #[test]
        fn test_wrap_measures_display_columns() {
            assert_eq!(wrap("❌ ab", 4), vec!["❌", "ab"]);
            assert_eq!(wrap("日本語", 4), vec!["日本", "語"]);
        }

        #[test]
        fn test_wrap_partial_reveal_is_stable() {
            assert_eq!(wrap("Hel", 10), vec!["Hel"]);
            assert_eq!(wrap("", 10), vec![""]);
        }
    }
}
