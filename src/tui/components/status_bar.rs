//! # StatusBar Component
//!
//! Bottom line: backend address with its last health result, the
//! message-queue label (and UI address when configured), and key hints for
//! the active tab.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::state::{Health, Tab};
use crate::tui::component::Component;

pub struct StatusBar<'a> {
    pub base_url: &'a str,
    pub health: &'a Health,
    pub queue_label: &'a str,
    pub queue_ui_url: Option<&'a str>,
    pub tab: Tab,
}

impl StatusBar<'_> {
    fn health_span(&self) -> Span<'static> {
        match self.health {
            Health::Unknown => Span::styled("● unknown", Style::default().fg(Color::DarkGray)),
            Health::Checking => Span::styled("● checking...", Style::default().fg(Color::Yellow)),
            Health::Up(status) => {
                Span::styled(format!("● {status}"), Style::default().fg(Color::Green))
            }
            Health::Down(reason) => {
                Span::styled(format!("● down ({reason})"), Style::default().fg(Color::Red))
            }
        }
    }

    fn hints(&self) -> &'static str {
        match self.tab {
            Tab::Send => "Tab focus · Ctrl+S send · F3 health · Ctrl+Q quit ",
            Tab::List => "F5 refresh · Ctrl+A auto · Ctrl+D clear · F3 health · Ctrl+Q quit ",
        }
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let dim = Style::default().fg(Color::DarkGray);
        let host = self
            .base_url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(self.base_url);

        let mut spans = vec![
            Span::styled(" Backend: ", dim),
            Span::raw(host.to_string()),
            Span::raw(" "),
            self.health_span(),
            Span::styled("  │  ", dim),
            Span::styled(format!("{} UI: ", self.queue_label), dim),
        ];
        match self.queue_ui_url {
            Some(url) => spans.push(Span::raw(url.to_string())),
            None => spans.push(Span::styled("not configured", dim)),
        }

        let hints = self.hints();
        let [left, right] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(hints.chars().count() as u16),
        ])
        .areas(area);

        frame.render_widget(Line::from(spans), left);
        frame.render_widget(Line::styled(hints, dim).right_aligned(), right);
    }
}
