//! # ConfirmDialog Component
//!
//! A centered yes/no overlay. Used for "clear all messages?" and for the
//! offer to switch to the list after a successful send.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const HELP_TEXT: &str = " y/Enter Yes  n/Esc No ";

/// Stateless dialog; the open/closed flag lives in core.
pub struct ConfirmDialog<'a> {
    pub title: &'a str,
    pub question: &'a str,
    /// Draw the border in the warning color
    pub destructive: bool,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(title: &'a str, question: &'a str) -> Self {
        Self {
            title,
            question,
            destructive: false,
        }
    }

    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }
}

impl Component for ConfirmDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 7, area);
        frame.render_widget(Clear, overlay);

        let color = if self.destructive {
            Color::Red
        } else {
            Color::Cyan
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(Line::from(format!(" {} ", self.title)).style(
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(HELP_TEXT).centered())
            .padding(Padding::new(1, 1, 1, 0));

        let question = Paragraph::new(self.question)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(question, overlay);
    }
}

impl EventHandler for ConfirmDialog<'_> {
    /// `true` for yes, `false` for no
    type Event = bool;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar('y' | 'Y') | TuiEvent::Submit => Some(true),
            TuiEvent::InputChar('n' | 'N') | TuiEvent::Escape => Some(false),
            _ => None,
        }
    }
}

/// A rect `percent_x` wide and `height` rows tall, centered in `outer`.
fn centered_rect(percent_x: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height.min(outer.height)),
        Constraint::Min(0),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_answers() {
        let mut dialog = ConfirmDialog::new("Clear", "Delete all messages?");
        assert_eq!(dialog.handle_event(&TuiEvent::InputChar('y')), Some(true));
        assert_eq!(dialog.handle_event(&TuiEvent::Submit), Some(true));
        assert_eq!(dialog.handle_event(&TuiEvent::InputChar('N')), Some(false));
        assert_eq!(dialog.handle_event(&TuiEvent::Escape), Some(false));
        assert_eq!(dialog.handle_event(&TuiEvent::InputChar('x')), None);
        assert_eq!(dialog.handle_event(&TuiEvent::Refresh), None);
    }

    #[test]
    fn test_centered_rect_fits_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 7, outer);
        assert_eq!(rect.height, 7);
        assert_eq!(rect.width, 60);
        assert!(rect.y > 0 && rect.bottom() < outer.bottom());

        let tiny = Rect::new(0, 0, 20, 4);
        assert!(centered_rect(60, 7, tiny).height <= 4);
    }

    #[test]
    fn test_render_question() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                ConfirmDialog::new("Clear", "Delete all messages?")
                    .destructive()
                    .render(f, f.area());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Delete all messages?"));
        assert!(text.contains("y/Enter Yes"));
    }
}
