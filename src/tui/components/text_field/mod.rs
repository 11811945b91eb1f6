//! # TextField Component
//!
//! A bordered, wrapping text input whose value lives in core state.
//!
//! ## State Management
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TextFieldState` (cursor + scroll) lives in `TuiState`
//! - `TextField` is created per frame / per event with the borrowed value
//!   and props, and never mutates the value itself. Edits come back as
//!   `FieldEvent::Edited(new_value)` so the parent can route them through
//!   `update()`.

mod cursor;
mod geometry;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use geometry::{FRAME_ROWS, FieldGeometry, accept_input};

/// High-level events emitted by a TextField
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// The value changed; carries the complete new value
    Edited(String),
    /// Only the cursor moved
    CursorMoved,
    /// Enter pressed
    Submit,
}

/// Persistent per-field presentation state.
#[derive(Debug, Default)]
pub struct TextFieldState {
    cursor: CursorState,
}

impl TextFieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte offset of the cursor in the current value.
    #[cfg(test)]
    pub fn cursor_pos(&self) -> usize {
        self.cursor.pos
    }
}

/// Transient text field wrapper.
///
/// # Props
///
/// - `value`: Current text (from core state)
/// - `label`: Border title
/// - `max_chars`: Input beyond this many characters is refused
/// - `max_visible_lines`: Lines shown before internal scrolling kicks in
/// - `multiline`: Whether newlines may be inserted
/// - `focused` / `disabled`: Styling and cursor placement
pub struct TextField<'a> {
    state: &'a mut TextFieldState,
    value: &'a str,
    pub label: &'a str,
    pub placeholder: &'a str,
    pub max_chars: Option<usize>,
    pub max_visible_lines: u16,
    pub multiline: bool,
    pub focused: bool,
    pub disabled: bool,
}

impl<'a> TextField<'a> {
    pub fn new(state: &'a mut TextFieldState, value: &'a str, label: &'a str) -> Self {
        state.cursor.clamp(value);
        Self {
            state,
            value,
            label,
            placeholder: "",
            max_chars: None,
            max_visible_lines: 1,
            multiline: false,
            focused: false,
            disabled: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    pub fn multiline(mut self, max_visible_lines: u16) -> Self {
        self.multiline = true;
        self.max_visible_lines = max_visible_lines.max(1);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Height needed for the current value, clamped to the visible-line limit.
    pub fn height(&self, area_width: u16) -> u16 {
        let rows = FieldGeometry::for_width(area_width).row_count(self.value);
        rows.min(self.max_visible_lines) + FRAME_ROWS
    }

    /// Characters still accepted before `max_chars`.
    fn remaining(&self) -> usize {
        self.max_chars
            .map(|max| max.saturating_sub(self.value.chars().count()))
            .unwrap_or(usize::MAX)
    }

    /// Insert `text` at the cursor, truncated to what the limit allows.
    fn insert(&mut self, text: &str) -> Option<FieldEvent> {
        let accepted = accept_input(text, self.multiline, self.remaining());
        if accepted.is_empty() {
            return None;
        }
        let pos = self.state.cursor.pos;
        let mut next = String::with_capacity(self.value.len() + accepted.len());
        next.push_str(&self.value[..pos]);
        next.push_str(&accepted);
        next.push_str(&self.value[pos..]);
        self.state.cursor.pos = pos + accepted.len();
        Some(FieldEvent::Edited(next))
    }

    fn visible_text(&self, area_width: u16) -> String {
        if self.state.cursor.scroll_offset == 0 {
            return self.value.to_string();
        }
        let geometry = FieldGeometry::for_width(area_width);
        if geometry.is_collapsed() {
            return String::new();
        }
        let lines = geometry.rows(self.value);
        let start = (self.state.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + self.max_visible_lines as usize).min(lines.len());
        lines[start..end].join("\n")
    }

    fn counter(&self) -> Option<String> {
        self.max_chars
            .map(|max| format!(" {}/{} ", self.value.chars().count(), max))
    }
}

/// Byte offset where the character before `pos` starts.
fn char_before(value: &str, pos: usize) -> usize {
    value[..pos].chars().next_back().map_or(0, |c| pos - c.len_utf8())
}

/// Byte offset just past the character starting at `pos`.
fn char_after(value: &str, pos: usize) -> usize {
    value[pos..].chars().next().map_or(value.len(), |c| pos + c.len_utf8())
}

impl Component for TextField<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let state = &mut self.state.cursor;
        state.last_width = area.width;
        state.update_scroll_offset(self.value, area.width, self.max_visible_lines);

        let border_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
        };

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!(" {} ", self.label))
            .padding(Padding::horizontal(1));
        if let Some(counter) = self.counter() {
            block = block.title_bottom(Line::from(counter).right_aligned());
        }

        let paragraph = if self.value.is_empty() {
            Paragraph::new(self.placeholder)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
        } else {
            Paragraph::new(self.visible_text(area.width))
                .wrap(ratatui::widgets::Wrap { trim: false })
                .style(Style::default().fg(if self.disabled {
                    Color::DarkGray
                } else {
                    Color::White
                }))
        };

        frame.render_widget(paragraph.block(block), area);

        if self.focused && !self.disabled {
            let (x, y) = self.state.cursor.screen_pos(self.value, area);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for TextField<'_> {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        let value = self.value;
        let cursor = &mut self.state.cursor;
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => {
                if cursor.pos == 0 {
                    return None;
                }
                let prev = char_before(value, cursor.pos);
                let next = format!("{}{}", &value[..prev], &value[cursor.pos..]);
                cursor.pos = prev;
                Some(FieldEvent::Edited(next))
            }
            TuiEvent::Delete => {
                if cursor.pos >= value.len() {
                    return None;
                }
                let next_pos = char_after(value, cursor.pos);
                Some(FieldEvent::Edited(format!(
                    "{}{}",
                    &value[..cursor.pos],
                    &value[next_pos..]
                )))
            }
            TuiEvent::CursorLeft => (cursor.pos > 0).then(|| {
                cursor.pos = char_before(value, cursor.pos);
                FieldEvent::CursorMoved
            }),
            TuiEvent::CursorRight => (cursor.pos < value.len()).then(|| {
                cursor.pos = char_after(value, cursor.pos);
                FieldEvent::CursorMoved
            }),
            TuiEvent::CursorHome => {
                let line_start = value[..cursor.pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
                (cursor.pos != line_start).then(|| {
                    cursor.pos = line_start;
                    FieldEvent::CursorMoved
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = value[cursor.pos..]
                    .find('\n')
                    .map(|i| cursor.pos + i)
                    .unwrap_or(value.len());
                (cursor.pos != line_end).then(|| {
                    cursor.pos = line_end;
                    FieldEvent::CursorMoved
                })
            }
            TuiEvent::CursorUp if self.multiline => {
                let width = cursor.last_width;
                cursor
                    .move_vertically(value, -1, width)
                    .then_some(FieldEvent::CursorMoved)
            }
            TuiEvent::CursorDown if self.multiline => {
                let width = cursor.last_width;
                cursor
                    .move_vertically(value, 1, width)
                    .then_some(FieldEvent::CursorMoved)
            }
            TuiEvent::Submit => Some(FieldEvent::Submit),
            _ => None,
        }
    }
}
