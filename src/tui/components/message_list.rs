//! # MessageList Component
//!
//! The List tab: a filter field, the viewer controls, statistics, and a
//! scrollable stack of message cards.
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and `&'a ViewerState` (props).
//! The filter text itself lives in core; the field only holds cursor state and
//! reports edits as `ViewerEvent::FilterChanged`.
//!
//! The filtered indices are memoized by (list revision, filter) so a redraw
//! with unchanged inputs never re-filters.

use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::composer::Status;
use crate::core::viewer::{FilterMemo, ViewerState};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message_card::MessageCard;
use crate::tui::components::spinner;
use crate::tui::components::text_field::{FieldEvent, TextField, TextFieldState};
use crate::tui::event::TuiEvent;

const FILTER_LABEL: &str = "Filter";
const FILTER_PLACEHOLDER: &str = "Search by name or text...";
const LOADING_TEXT: &str = "Loading messages...";
const EMPTY_HINT: &str = "No messages yet. Send the first one from the Send tab (F1)!";

/// High-level events emitted by the message list
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    FilterChanged(String),
}

/// Presentation state for the List tab.
/// Must be persisted in the parent TuiState and reset whenever the viewer remounts.
#[derive(Default)]
pub struct MessageListState {
    pub filter_field: TextFieldState,
    pub scroll_state: ScrollViewState,
    pub memo: FilterMemo,
    /// Last known viewport height (for scroll clamping between frames)
    viewport_height: u16,
    /// Total height of the rendered cards
    content_height: u16,
}

impl MessageListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Transient List tab component.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub viewer: &'a ViewerState,
    pub queue_label: &'a str,
    pub refresh_interval: Duration,
    pub spinner_frame: usize,
    /// A dialog owns the keyboard; the filter shows unfocused
    pub dimmed: bool,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        viewer: &'a ViewerState,
        queue_label: &'a str,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            state,
            viewer,
            queue_label,
            refresh_interval,
            spinner_frame: 0,
            dimmed: false,
        }
    }

    fn controls_line(&self) -> Line<'static> {
        let key = Style::default().fg(Color::Cyan);
        let dim = Style::default().fg(Color::DarkGray);
        let auto = if self.viewer.auto_refresh {
            Span::styled("on", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::styled("off", dim)
        };

        let mut spans = vec![
            Span::styled(" F5", key),
            Span::raw(" Refresh  "),
            Span::styled("Ctrl+A", key),
            Span::raw(format!(
                " Auto-refresh ({}s): ",
                self.refresh_interval.as_secs()
            )),
            auto,
            Span::raw("  "),
        ];
        if self.viewer.can_clear() {
            spans.push(Span::styled("Ctrl+D", key));
            spans.push(Span::raw(" Clear all"));
        } else {
            spans.push(Span::styled("Ctrl+D Clear all", dim));
        }
        if self.viewer.fetching {
            spans.push(Span::styled(
                format!("  {} Loading...", spinner(self.spinner_frame)),
                Style::default().fg(Color::Yellow),
            ));
        } else if self.viewer.clearing {
            spans.push(Span::styled(
                format!("  {} Deleting...", spinner(self.spinner_frame)),
                Style::default().fg(Color::Yellow),
            ));
        }
        Line::from(spans)
    }

    fn status_line(&self) -> Line<'static> {
        match &self.viewer.status {
            Status::Error(text) => Line::styled(
                format!(" ⚠ {text}"),
                Style::default().fg(Color::Red),
            ),
            Status::Success(text) => Line::styled(
                format!(" ✓ {text}"),
                Style::default().fg(Color::Green),
            ),
            Status::Idle | Status::Loading => Line::default(),
        }
    }

    fn stats_line(&self, shown: usize) -> Line<'static> {
        let mut text = format!(" Total messages: {shown}");
        if !self.viewer.filter.is_empty() {
            text.push_str(&format!(" (filtered from {})", self.viewer.messages.len()));
        }
        Line::styled(text, Style::default().fg(Color::Gray))
    }

    /// Placeholder text when there are no cards to show.
    fn empty_text(&self) -> String {
        if self.viewer.fetching && self.viewer.messages.is_empty() {
            LOADING_TEXT.to_string()
        } else if !self.viewer.filter.is_empty() {
            format!("No messages match the filter \"{}\"", self.viewer.filter)
        } else {
            EMPTY_HINT.to_string()
        }
    }

    fn render_cards(&mut self, frame: &mut Frame, area: Rect, indices: &[usize]) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let heights: Vec<u16> = indices
            .iter()
            .map(|&i| MessageCard::calculate_height(&self.viewer.messages[i], content_width))
            .collect();
        let total_height: u16 = heights.iter().fold(0u16, |acc, h| acc.saturating_add(*h));

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (position, (&index, &height)) in indices.iter().zip(&heights).enumerate() {
            let card = MessageCard::new(&self.viewer.messages[index], position);
            scroll_view.render_widget(card, Rect::new(0, y_offset, content_width, height));
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, filter_area, controls_area, status_area, stats_area, list_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .areas(area);

        frame.render_widget(
            Line::styled(
                format!(" Messages from {}", self.queue_label),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            header_area,
        );

        TextField::new(&mut self.state.filter_field, &self.viewer.filter, FILTER_LABEL)
            .placeholder(FILTER_PLACEHOLDER)
            .focused(!self.dimmed)
            .render(frame, filter_area);

        frame.render_widget(self.controls_line(), controls_area);
        frame.render_widget(self.status_line(), status_area);

        let indices = self
            .state
            .memo
            .indices(&self.viewer.messages, self.viewer.revision, &self.viewer.filter)
            .to_vec();
        frame.render_widget(self.stats_line(indices.len()), stats_area);

        if indices.is_empty() {
            let empty = Paragraph::new(self.empty_text())
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            let [_, centered, _] = Layout::vertical([
                Constraint::Percentage(40),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .areas(list_area);
            frame.render_widget(empty, centered);
            return;
        }

        self.render_cards(frame, list_area, &indices);
    }
}

impl EventHandler for MessageList<'_> {
    type Event = ViewerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.state.scroll_state.scroll_up();
                None
            }
            TuiEvent::CursorDown => {
                self.state.scroll_state.scroll_down();
                self.state.clamp_scroll();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.state.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::ScrollPageDown => {
                self.state.scroll_state.scroll_page_down();
                self.state.clamp_scroll();
                None
            }
            TuiEvent::Submit => None,
            other => {
                let mut field =
                    TextField::new(&mut self.state.filter_field, &self.viewer.filter, FILTER_LABEL);
                match field.handle_event(other)? {
                    FieldEvent::Edited(value) => {
                        // New filter, new result set: start from the top
                        self.state.scroll_state.scroll_to_top();
                        Some(ViewerEvent::FilterChanged(value))
                    }
                    FieldEvent::CursorMoved | FieldEvent::Submit => None,
                }
            }
        }
    }
}
