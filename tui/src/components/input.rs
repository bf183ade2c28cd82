use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{block::Title, Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use crate::state::AppState;

/// Component for rendering the question input and the submit control
pub struct InputComponent;

impl InputComponent {
    /// Render the input area
    pub fn render(state: &AppState, f: &mut Frame, area: Rect) {
        let input = &state.widget.input;
        let text_width = area.width.saturating_sub(2) as usize;

        // Keep the cursor inside the visible window for long questions
        let cursor_col = input.text.get(..input.cursor).unwrap_or(&input.text).width();
        let offset = cursor_col.saturating_sub(text_width.saturating_sub(1));
        // Hide whole characters; a wide one may push past `offset`
        let mut hidden = 0;
        let visible: String = input
            .text
            .chars()
            .skip_while(|ch| {
                let skip = hidden < offset;
                if skip {
                    hidden += ch.width().unwrap_or(0);
                }
                skip
            })
            .collect();

        let border_style = if state.input_focused() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let control = state.widget.submit_control();
        let control_style = if control.enabled {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let input_widget = Paragraph::new(visible)
            .block(Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Question (Enter to ask, Ctrl+K to focus) ")
                .title(Title::from(Span::styled(format!("[ {} ]", control.label), control_style))
                    .alignment(Alignment::Right)));

        f.render_widget(input_widget, area);

        if state.input_focused() && state.cursor_visible {
            let cursor_x = area.x + 1 + cursor_col.saturating_sub(hidden) as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}
