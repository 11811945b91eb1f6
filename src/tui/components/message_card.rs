use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::api::Message;
use crate::core::viewer::{display_content, display_sender, format_timestamp, short_id};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless card for one received message.
///
/// The sender sits in the top border, the short id on the right of it,
/// and the formatted timestamp in the bottom border. Missing fields fall
/// back to the viewer's placeholders.
#[derive(Clone, Copy)]
pub struct MessageCard<'a> {
    pub message: &'a Message,
    /// Position in the filtered view, shown when the message has no id
    pub index: usize,
}

impl<'a> MessageCard<'a> {
    pub fn new(message: &'a Message, index: usize) -> Self {
        Self { message, index }
    }

    /// Rows the card needs at `width`, predicted with the same wrapping
    /// rules `Paragraph` uses so the list can lay out without rendering.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(display_content(message).trim(), options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

impl Widget for MessageCard<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let has_content = self.message.content.as_deref().is_some_and(|c| !c.is_empty());
        let content_style = if has_content {
            Style::default().fg(Color::White)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC)
        };
        let border_style = Style::default().fg(Color::Green).add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(format!(" {} ", display_sender(self.message))).style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .title(
                Line::from(format!(" {} ", short_id(self.message.id.as_deref(), self.index)))
                    .right_aligned()
                    .style(Style::default().fg(Color::DarkGray)),
            )
            .title_bottom(
                Line::from(format!(" {} ", format_timestamp(self.message.timestamp.as_ref())))
                    .right_aligned()
                    .style(Style::default().fg(Color::DarkGray)),
            )
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(display_content(self.message).trim())
            .style(content_style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Timestamp;
    use crate::test_support::message;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(card: MessageCard, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(card, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_height_single_line() {
        let msg = message("1", "Ann", "Hello");
        assert_eq!(MessageCard::calculate_height(&msg, 40), 3);
    }

    #[test]
    fn test_height_wraps_long_content() {
        // 36 usable columns
        let msg = message("1", "Ann", &"word ".repeat(20));
        assert_eq!(MessageCard::calculate_height(&msg, 40), 5);
    }

    #[test]
    fn test_height_counts_embedded_newlines() {
        let msg = message("1", "Ann", "one\ntwo\nthree");
        assert_eq!(MessageCard::calculate_height(&msg, 40), 5);
    }

    #[test]
    fn test_height_degenerate_width() {
        let msg = message("1", "Ann", "Hello");
        assert_eq!(MessageCard::calculate_height(&msg, 3), 1);
    }

    #[test]
    fn test_render_shows_sender_id_and_content() {
        let msg = message("0123456789abcdef", "Ann", "Hello there");
        let text = render_to_text(MessageCard::new(&msg, 0), 50, 3);
        assert!(text.contains("Ann"));
        assert!(text.contains("#89abcdef"));
        assert!(text.contains("Hello there"));
        assert!(text.contains("No data"));
    }

    #[test]
    fn test_render_placeholders_for_missing_fields() {
        let msg = Message {
            timestamp: Some(Timestamp::Text("not a date".into())),
            ..Default::default()
        };
        let text = render_to_text(MessageCard::new(&msg, 7), 50, 3);
        assert!(text.contains("Anonymous"));
        assert!(text.contains("Empty message"));
        assert!(text.contains("#7"));
        assert!(text.contains("not a date"));
    }
}
