use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use crate::state::AppState;

/// Component for rendering the status line and typing indicator
pub struct StatusComponent;

impl StatusComponent {
    /// Render the status line
    pub fn render(state: &AppState, f: &mut Frame, area: Rect) {
        let (status_text, style) = if state.widget.typing_indicator_visible() {
            ("● Thinking...".to_string(), Style::default().fg(Color::Yellow))
        } else if state.widget.is_busy() {
            ("● Answering...".to_string(), Style::default().fg(Color::Yellow))
        } else {
            let info = state.widget.backend_info();
            (
                format!(
                    "Ready - {} ({}) | Tab to switch, ↑↓ to scroll, Ctrl+C to quit",
                    info.name, info.endpoint
                ),
                Style::default().fg(Color::Green),
            )
        };

        f.render_widget(Paragraph::new(status_text).style(style), area);
    }
}
