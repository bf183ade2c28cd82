use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use crate::state::AppState;

/// Handles input events for the application
pub struct InputHandler;

impl InputHandler {
    /// Handle input events (keyboard and mouse)
    pub fn handle_event(state: &mut AppState, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Self::handle_key_event(state, key.code, key.modifiers);
            }
            Event::Mouse(mouse_event) => {
                Self::handle_mouse_event(state, mouse_event);
            }
            _ => {}
        }
    }

    /// Handle a single key press
    pub fn handle_key_event(state: &mut AppState, key_code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key_code {
                KeyCode::Char('c') => state.should_quit = true,
                // Focus the question from anywhere; nothing else sees the key
                KeyCode::Char('k') => state.widget.focus_input(),
                _ => {}
            }
            return;
        }

        if key_code == KeyCode::Tab {
            state.widget.input.focused = !state.widget.input.focused;
            return;
        }

        if state.input_focused() {
            Self::handle_input_key(state, key_code);
        } else {
            Self::handle_display_key(state, key_code);
        }
    }

    fn handle_input_key(state: &mut AppState, key_code: KeyCode) {
        match key_code {
            KeyCode::Enter => Self::submit_input(state),
            KeyCode::Char(c) => Self::insert_char(state, c),
            KeyCode::Backspace => Self::delete_char(state),
            KeyCode::Left => Self::move_cursor_left(state),
            KeyCode::Right => Self::move_cursor_right(state),
            KeyCode::Home => state.widget.input.cursor = 0,
            KeyCode::End => state.widget.input.cursor = state.widget.input.text.len(),
            KeyCode::Esc => state.widget.input.clear(),
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
                Self::handle_display_key(state, key_code);
            }
            _ => {}
        }
    }

    fn handle_display_key(state: &mut AppState, key_code: KeyCode) {
        match key_code {
            KeyCode::Char('q') => state.should_quit = true,
            KeyCode::Up => Self::scroll_up(state, 1),
            KeyCode::Down => Self::scroll_down(state, 1),
            KeyCode::PageUp => Self::scroll_up(state, 10),
            KeyCode::PageDown => Self::scroll_down(state, 10),
            KeyCode::Home => {
                state.chat_scroll = 0;
                state.widget.display_mut().release_tail();
            }
            KeyCode::End => {
                // Jump to bottom and re-enable auto-scroll
                state.widget.display_mut().scroll_to_bottom();
            }
            KeyCode::Esc => state.widget.focus_input(),
            _ => {}
        }
    }

    fn handle_mouse_event(state: &mut AppState, mouse_event: MouseEvent) {
        match mouse_event.kind {
            MouseEventKind::ScrollUp => Self::scroll_up(state, 3),
            MouseEventKind::ScrollDown => Self::scroll_down(state, 3),
            _ => {}
        }
    }

    fn scroll_up(state: &mut AppState, lines: usize) {
        state.chat_scroll = state.chat_scroll.saturating_sub(lines);
        // Disable auto-scroll when user manually scrolls
        state.widget.display_mut().release_tail();
    }

    fn scroll_down(state: &mut AppState, lines: usize) {
        // Clamped to the content height on the next render
        state.chat_scroll = state.chat_scroll.saturating_add(lines);
        state.widget.display_mut().release_tail();
    }

    /// Submit the current input to the widget
    fn submit_input(state: &mut AppState) {
        if state.widget.submit_input() {
            state.chat_scroll = 0;
        }
    }

    /// Insert a character at the cursor position
    fn insert_char(state: &mut AppState, ch: char) {
        let input = &mut state.widget.input;
        if input.cursor <= input.text.len() {
            input.text.insert(input.cursor, ch);
            input.cursor += ch.len_utf8();
        }
    }

    /// Delete character before cursor
    fn delete_char(state: &mut AppState) {
        let input = &mut state.widget.input;
        if let Some((index, _)) = input.text[..input.cursor].char_indices().next_back() {
            input.text.remove(index);
            input.cursor = index;
        }
    }

    /// Move cursor left
    fn move_cursor_left(state: &mut AppState) {
        let input = &mut state.widget.input;
        if let Some((index, _)) = input.text[..input.cursor].char_indices().next_back() {
            input.cursor = index;
        }
    }

    /// Move cursor right
    fn move_cursor_right(state: &mut AppState) {
        let input = &mut state.widget.input;
        if let Some(ch) = input.text[input.cursor..].chars().next() {
            input.cursor += ch.len_utf8();
        }
    }
}
