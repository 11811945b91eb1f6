//! # Composer Component
//!
//! The Send tab: sender and content fields, the send button, the inline
//! status, and a short info panel.
//!
//! Focus moves `Sender → Content → Send` with Tab. Enter on the sender field
//! advances focus, Enter on content or the button submits. Field values stay
//! in core; edits are reported as `ComposerEvent::Edited`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::core::composer::{
    ComposerState, DraftField, MAX_CONTENT_CHARS, MAX_SENDER_CHARS, Status,
};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::spinner;
use crate::tui::components::text_field::{FieldEvent, TextField, TextFieldState};
use crate::tui::event::TuiEvent;

/// Visible lines of the content field before it scrolls internally.
const CONTENT_VISIBLE_LINES: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerFocus {
    #[default]
    Sender,
    Content,
    SendButton,
}

impl ComposerFocus {
    fn next(self) -> Self {
        match self {
            ComposerFocus::Sender => ComposerFocus::Content,
            ComposerFocus::Content => ComposerFocus::SendButton,
            ComposerFocus::SendButton => ComposerFocus::Sender,
        }
    }

    fn prev(self) -> Self {
        match self {
            ComposerFocus::Sender => ComposerFocus::SendButton,
            ComposerFocus::Content => ComposerFocus::Sender,
            ComposerFocus::SendButton => ComposerFocus::Content,
        }
    }

    fn field(self) -> Option<DraftField> {
        match self {
            ComposerFocus::Sender => Some(DraftField::Sender),
            ComposerFocus::Content => Some(DraftField::Content),
            ComposerFocus::SendButton => None,
        }
    }
}

/// High-level events emitted by the composer
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    Edited { field: DraftField, value: String },
    Submit,
}

/// Persistent presentation state for the Send tab.
#[derive(Debug, Default)]
pub struct ComposerViewState {
    pub focus: ComposerFocus,
    pub sender_field: TextFieldState,
    pub content_field: TextFieldState,
}

impl ComposerViewState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Transient Send tab component.
pub struct Composer<'a> {
    pub state: &'a mut ComposerViewState,
    pub composer: &'a ComposerState,
    pub queue_label: &'a str,
    pub base_url: &'a str,
    pub spinner_frame: usize,
    /// A dialog owns the keyboard; nothing shows focused
    pub dimmed: bool,
}

impl<'a> Composer<'a> {
    pub fn new(
        state: &'a mut ComposerViewState,
        composer: &'a ComposerState,
        queue_label: &'a str,
        base_url: &'a str,
    ) -> Self {
        Self {
            state,
            composer,
            queue_label,
            base_url,
            spinner_frame: 0,
            dimmed: false,
        }
    }

    fn field<'s>(
        state: &'s mut TextFieldState,
        value: &'s str,
        field: DraftField,
        sending: bool,
    ) -> TextField<'s> {
        let text_field = TextField::new(state, value, field.label())
            .max_chars(field.max_chars())
            .disabled(sending);
        match field {
            DraftField::Sender => text_field.placeholder("Enter your name"),
            DraftField::Content => text_field
                .placeholder("Enter the message text (Ctrl+J for a new line)")
                .multiline(CONTENT_VISIBLE_LINES),
        }
    }

    fn button_line(&self) -> Line<'static> {
        let focused = self.state.focus == ComposerFocus::SendButton && !self.dimmed;
        if self.composer.is_sending() {
            return Line::from(Span::styled(
                format!(" [ {} Sending... ] ", spinner(self.spinner_frame)),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        Line::from(vec![
            Span::styled(" [ Send message ] ", style),
            Span::styled("  Ctrl+S", Style::default().fg(Color::DarkGray)),
        ])
    }

    fn status_line(&self) -> Line<'static> {
        match &self.composer.status {
            Status::Success(text) => {
                Line::styled(format!(" ✓ {text}"), Style::default().fg(Color::Green))
            }
            Status::Error(text) => {
                Line::styled(format!(" ✗ {text}"), Style::default().fg(Color::Red))
            }
            Status::Idle | Status::Loading => Line::default(),
        }
    }

    fn info_panel(&self) -> Paragraph<'static> {
        let dim = Style::default().fg(Color::Gray);
        let lines = vec![
            Line::styled(
                format!("• Messages are relayed by the backend to {}", self.queue_label),
                dim,
            ),
            Line::styled(
                format!(
                    "• Name up to {MAX_SENDER_CHARS} characters, message up to {MAX_CONTENT_CHARS}"
                ),
                dim,
            ),
            Line::styled("• Sent messages are available on the List tab (F2)", dim),
            Line::styled(format!("• Backend API: {}/api/messages", self.base_url), dim),
        ];
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Info ")
                .padding(Padding::horizontal(1)),
        )
    }
}

impl Component for Composer<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let sending = self.composer.is_sending();
        let draft = &self.composer.draft;
        let focus = self.state.focus;

        let content_height = Self::field(
            &mut self.state.content_field,
            &draft.content,
            DraftField::Content,
            sending,
        )
        .height(area.width);

        let [header_area, sender_area, content_area, button_area, status_area, _, info_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(content_height),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .areas(area);

        frame.render_widget(
            Line::styled(
                format!(" Send a message to {}", self.queue_label),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            header_area,
        );

        Self::field(&mut self.state.sender_field, &draft.sender, DraftField::Sender, sending)
            .focused(!self.dimmed && focus == ComposerFocus::Sender)
            .render(frame, sender_area);
        Self::field(
            &mut self.state.content_field,
            &draft.content,
            DraftField::Content,
            sending,
        )
        .focused(!self.dimmed && focus == ComposerFocus::Content)
        .render(frame, content_area);

        frame.render_widget(self.button_line(), button_area);
        frame.render_widget(self.status_line(), status_area);
        if info_area.height >= 3 {
            frame.render_widget(self.info_panel(), info_area);
        }
    }
}

impl EventHandler for Composer<'_> {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::NextField => {
                self.state.focus = self.state.focus.next();
                return None;
            }
            TuiEvent::PrevField => {
                self.state.focus = self.state.focus.prev();
                return None;
            }
            _ => {}
        }

        let sending = self.composer.is_sending();
        let Some(field) = self.state.focus.field() else {
            // Send button: Enter or Space presses it
            return match event {
                TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(ComposerEvent::Submit),
                _ => None,
            };
        };

        let state = match field {
            DraftField::Sender => &mut self.state.sender_field,
            DraftField::Content => &mut self.state.content_field,
        };
        let value = self.composer.draft.field(field);
        match Self::field(state, value, field, sending).handle_event(event)? {
            FieldEvent::Edited(value) => Some(ComposerEvent::Edited { field, value }),
            FieldEvent::CursorMoved => None,
            FieldEvent::Submit => match field {
                DraftField::Sender => {
                    self.state.focus = ComposerFocus::Content;
                    None
                }
                DraftField::Content => Some(ComposerEvent::Submit),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::composer::Draft;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    const BASE: &str = "http://backend.test:8089";

    fn composer_with(sender: &str, content: &str, status: Status) -> ComposerState {
        ComposerState {
            draft: Draft {
                sender: sender.to_string(),
                content: content.to_string(),
            },
            status,
        }
    }

    fn render(state: &mut ComposerViewState, composer: &ComposerState) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                Composer::new(state, composer, "Kafka", BASE).render(f, f.area());
            })
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
    fn test_typing_edits_focused_field() {
        let composer = ComposerState::default();
        let mut state = ComposerViewState::new();
        let mut view = Composer::new(&mut state, &composer, "Kafka", BASE);
        assert_eq!(
            view.handle_event(&TuiEvent::InputChar('A')),
            Some(ComposerEvent::Edited {
                field: DraftField::Sender,
                value: "A".to_string()
            })
        );

        view.handle_event(&TuiEvent::NextField);
        assert_eq!(
            view.handle_event(&TuiEvent::InputChar('H')),
            Some(ComposerEvent::Edited {
                field: DraftField::Content,
                value: "H".to_string()
            })
        );
    }

    #[test]
    fn test_enter_advances_then_submits() {
        let composer = composer_with("Ann", "Hi", Status::Idle);
        let mut state = ComposerViewState::new();
        let mut view = Composer::new(&mut state, &composer, "Kafka", BASE);
        assert_eq!(view.handle_event(&TuiEvent::Submit), None);
        assert_eq!(view.state.focus, ComposerFocus::Content);
        assert_eq!(view.handle_event(&TuiEvent::Submit), Some(ComposerEvent::Submit));
    }

    #[test]
    fn test_focus_cycles_through_button() {
        let composer = ComposerState::default();
        let mut state = ComposerViewState::new();
        let mut view = Composer::new(&mut state, &composer, "Kafka", BASE);
        view.handle_event(&TuiEvent::PrevField);
        assert_eq!(view.state.focus, ComposerFocus::SendButton);
        assert_eq!(view.handle_event(&TuiEvent::InputChar(' ')), Some(ComposerEvent::Submit));
        assert_eq!(view.handle_event(&TuiEvent::InputChar('x')), None);
        view.handle_event(&TuiEvent::NextField);
        assert_eq!(view.state.focus, ComposerFocus::Sender);
    }

    #[test]
    fn test_fields_locked_while_sending() {
        let composer = composer_with("Ann", "Hi", Status::Loading);
        let mut state = ComposerViewState::new();
        let mut view = Composer::new(&mut state, &composer, "Kafka", BASE);
        assert_eq!(view.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_sender_limit_enforced_at_input() {
        let composer = composer_with(&"a".repeat(MAX_SENDER_CHARS), "", Status::Idle);
        let mut state = ComposerViewState::new();
        let mut view = Composer::new(&mut state, &composer, "Kafka", BASE);
        assert_eq!(view.handle_event(&TuiEvent::InputChar('b')), None);
    }

    #[test]
    fn test_render_idle_form() {
        let composer = composer_with("Ann", "", Status::Idle);
        let mut state = ComposerViewState::new();
        let text = render(&mut state, &composer);
        assert!(text.contains("Send a message to Kafka"));
        assert!(text.contains("Your name"));
        assert!(text.contains("Message text"));
        assert!(text.contains("3/50"));
        assert!(text.contains("0/500"));
        assert!(text.contains("Send message"));
        assert!(text.contains("http://backend.test:8089/api/messages"));
    }

    #[test]
    fn test_render_sending_and_status() {
        let composer = composer_with("Ann", "Hi", Status::Loading);
        let mut state = ComposerViewState::new();
        assert!(render(&mut state, &composer).contains("Sending..."));

        let composer = composer_with("", "", Status::Error("Please fill in all fields".into()));
        assert!(render(&mut state, &composer).contains("Please fill in all fields"));
    }
}
