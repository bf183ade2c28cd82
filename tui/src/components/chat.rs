use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use quickask_core::{DisplayNode, NodeKind};
use crate::{state::AppState, utils::text::wrap};

pub const QUESTION_COLOR: Color = Color::Rgb(0x66, 0x7e, 0xea);
pub const ERROR_COLOR: Color = Color::Rgb(0xff, 0x6b, 0x6b);

/// Component for rendering the display area
pub struct ChatComponent;

impl ChatComponent {
    /// Render the current question/answer pair
    pub fn render(state: &mut AppState, f: &mut Frame, area: Rect) {
        let available_width = area.width.saturating_sub(4) as usize; // Account for borders and padding
        let chat_lines = Self::build_lines(state.widget.display().nodes(), available_width);

        // Calculate scroll limits
        let content_height = chat_lines.len();
        let visible_height = area.height.saturating_sub(2) as usize; // Account for borders
        let max_scroll = content_height.saturating_sub(visible_height);

        let scroll_pos = if state.widget.display().follows_tail() {
            max_scroll
        } else {
            state.chat_scroll.min(max_scroll)
        };
        state.chat_scroll = scroll_pos;

        let visible_lines: Vec<Line> = chat_lines
            .into_iter()
            .skip(scroll_pos)
            .take(visible_height)
            .collect();

        let (border_style, title) = if state.input_focused() {
            (Style::default(), " Chat ")
        } else {
            (Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD), " Chat [FOCUSED] ")
        };

        let chat = Paragraph::new(Text::from(visible_lines))
            .block(Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title));

        f.render_widget(chat, area);

        if content_height > visible_height {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));
            let mut scrollbar_state = ScrollbarState::new(max_scroll.max(1))
                .position(scroll_pos);
            f.render_stateful_widget(
                scrollbar,
                area.inner(&ratatui::layout::Margin { vertical: 1, horizontal: 0 }),
                &mut scrollbar_state,
            );
        }
    }

    /// Lay out the display nodes as wrapped, styled lines
    pub fn build_lines(nodes: &[DisplayNode], width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for node in nodes {
            match node.kind {
                NodeKind::Question => Self::push_question(&mut lines, &node.text, width),
                NodeKind::Answer => Self::push_styled(&mut lines, &node.text, Style::default(), width),
                NodeKind::Error => Self::push_styled(&mut lines, &node.text, Style::default().fg(ERROR_COLOR), width),
            }
            // Spacing between question and answer
            lines.push(Line::from(""));
        }
        lines
    }

    fn push_question(lines: &mut Vec<Line<'static>>, question: &str, width: usize) {
        let style = Style::default().fg(QUESTION_COLOR);
        let mut wrapped = wrap(&format!("Q: {}", question), width).into_iter();

        // Bold label on the first line only
        if let Some(first) = wrapped.next() {
            let rest = first.strip_prefix("Q:").unwrap_or(&first).to_string();
            lines.push(Line::from(vec![
                Span::styled("Q:", style.add_modifier(Modifier::BOLD)),
                Span::styled(rest, style),
            ]));
        }
        lines.extend(wrapped.map(|line| Line::from(Span::styled(line, style))));
    }

    fn push_styled(lines: &mut Vec<Line<'static>>, content: &str, style: Style, width: usize) {
        lines.extend(
            wrap(content, width)
                .into_iter()
                .map(|line| Line::from(Span::styled(line, style))),
        );
    }
}
