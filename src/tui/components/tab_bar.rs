//! # TabBar Component
//!
//! Single-line header: the application name followed by the two tabs, the
//! active one highlighted, plus an activity spinner while anything is in flight.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::Tab;
use crate::tui::component::Component;
use crate::tui::components::spinner;

pub struct TabBar {
    pub active: Tab,
    pub busy: bool,
    pub spinner_frame: usize,
}

impl TabBar {
    pub fn new(active: Tab, busy: bool, spinner_frame: usize) -> Self {
        Self {
            active,
            busy,
            spinner_frame,
        }
    }

    fn tab_span(&self, tab: Tab, key: &str) -> Span<'static> {
        let text = format!(" {key} {} ", tab.label());
        if tab == self.active {
            Span::styled(
                text,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(text, Style::default().fg(Color::Gray))
        }
    }
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                " Courier ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("│"),
            self.tab_span(Tab::Send, "F1"),
            self.tab_span(Tab::List, "F2"),
        ];
        if self.busy {
            spans.push(Span::styled(
                format!(" {}", spinner(self.spinner_frame)),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
