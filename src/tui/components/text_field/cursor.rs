//! Cursor position tracking and navigation for text fields.
//!
//! `CursorState` owns the cursor byte offset, scroll offset, and cached width.
//! The text itself lives in core state, so every method takes `value: &str`
//! explicitly and `clamp()` repairs the cursor after the value changed
//! underneath it (e.g. the draft was cleared after a send).

use super::geometry::FieldGeometry;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Cursor and scroll state, separated from the text value.
#[derive(Debug)]
pub struct CursorState {
    /// Cursor position as byte offset in the value (0..=value.len())
    pub pos: usize,
    /// Line offset for internal scrolling (0 when content fits in viewport)
    pub scroll_offset: u16,
    /// Cached field width from last render (used for cursor movement)
    pub last_width: u16,
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Keep the cursor inside `value` and on a char boundary.
    pub fn clamp(&mut self, value: &str) {
        if self.pos > value.len() || !value.is_char_boundary(self.pos) {
            self.pos = value.len();
        }
        if value.is_empty() {
            self.scroll_offset = 0;
        }
    }

    /// Move cursor vertically (up or down) while trying to maintain column position.
    ///
    /// Returns `true` if cursor moved, `false` if already at boundary.
    pub fn move_vertically(&mut self, value: &str, direction: i16, field_width: u16) -> bool {
        let geometry = FieldGeometry::for_width(field_width);
        if geometry.is_collapsed() || value.is_empty() {
            return false;
        }

        let lines = geometry.rows(value);
        if lines.is_empty() {
            return false;
        }

        // Byte length of a wrapped line including its trailing newline (if present)
        let line_byte_span = |line: &str, offset: usize| -> usize {
            let has_newline = offset + line.len() < value.len()
                && value.as_bytes()[offset + line.len()] == b'\n';
            line.len() + usize::from(has_newline)
        };

        let mut byte_offset = 0;
        let mut current_line_idx = 0;
        let mut column_in_line = 0;

        for (idx, line) in lines.iter().enumerate() {
            if byte_offset + line.len() >= self.pos {
                current_line_idx = idx;
                column_in_line = self.pos - byte_offset;
                break;
            }
            byte_offset += line_byte_span(line, byte_offset);
        }

        let target_line_idx = if direction < 0 {
            if current_line_idx == 0 {
                return false;
            }
            current_line_idx - 1
        } else {
            if current_line_idx >= lines.len() - 1 {
                return false;
            }
            current_line_idx + 1
        };

        let mut target_line_start = 0;
        for line in lines.iter().take(target_line_idx) {
            target_line_start += line_byte_span(line, target_line_start);
        }

        // Same column, clamped to the target line and snapped to a char boundary
        let mut target = target_line_start + column_in_line.min(lines[target_line_idx].len());
        while target > 0 && !value.is_char_boundary(target) {
            target -= 1;
        }
        self.pos = target;

        true
    }

    /// Calculate which wrapped line (0-based) the cursor is on.
    pub fn calculate_line(&self, value: &str, field_width: u16) -> u16 {
        let geometry = FieldGeometry::for_width(field_width);
        if geometry.is_collapsed() {
            return 0;
        }

        let lines = geometry.rows(&value[..self.pos]);
        let mut cursor_line = lines.len().saturating_sub(1) as u16;

        // If cursor is right after a newline that textwrap didn't represent, add one
        if self.pos > 0
            && value.as_bytes()[self.pos - 1] == b'\n'
            && !lines.last().is_some_and(|l| l.is_empty())
        {
            cursor_line += 1;
        }

        cursor_line
    }

    /// Update scroll offset to keep cursor visible within `max_visible` lines.
    pub fn update_scroll_offset(&mut self, value: &str, field_width: u16, max_visible: u16) {
        let total_lines = FieldGeometry::for_width(field_width).row_count(value);

        if total_lines <= max_visible {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(value, field_width);

        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + max_visible {
            self.scroll_offset = cursor_line.saturating_sub(max_visible - 1);
        }
    }

    /// Calculate screen position for cursor based on wrapped text layout.
    /// Returns (column, row) in screen coordinates.
    pub fn screen_pos(&self, value: &str, area: Rect) -> (u16, u16) {
        let geometry = FieldGeometry::for_width(area.width);
        let (origin_x, origin_y) = FieldGeometry::origin(area);
        if geometry.is_collapsed() {
            return (origin_x, origin_y);
        }

        let text_before_cursor = &value[..self.pos];
        let lines = geometry.rows(text_before_cursor);

        let mut cursor_line = lines.len().saturating_sub(1) as u16;

        let last_newline = text_before_cursor
            .rfind('\n')
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let logical_line_to_cursor = &text_before_cursor[last_newline..];
        if logical_line_to_cursor.is_empty() && last_newline > 0 {
            // Just after a newline: textwrap may have dropped the empty line
            if !lines.last().is_some_and(|l| l.is_empty()) {
                cursor_line += 1;
            }
        }

        // Column measured from the current logical line; textwrap trims
        // trailing whitespace so wrapped segment widths can't be used directly.
        let logical_line_wrapped = geometry.rows(logical_line_to_cursor);

        let cursor_col = if logical_line_wrapped.is_empty() {
            0
        } else {
            let width_in_prev_segments: usize = logical_line_wrapped
                .iter()
                .take(logical_line_wrapped.len() - 1)
                .map(|seg| seg.width())
                .sum();

            logical_line_to_cursor
                .width()
                .saturating_sub(width_in_prev_segments) as u16
        };

        let visible_line = cursor_line.saturating_sub(self.scroll_offset);

        (origin_x + cursor_col, origin_y + visible_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_cursor_back_into_value() {
        let mut cursor = CursorState::new();
        cursor.pos = 10;
        cursor.clamp("abc");
        assert_eq!(cursor.pos, 3);

        cursor.clamp("");
        assert_eq!(cursor.pos, 0);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn clamp_snaps_off_char_interior() {
        let mut cursor = CursorState::new();
        cursor.pos = 1;
        cursor.clamp("Ж");
        assert_eq!(cursor.pos, 2);
    }

    #[test]
    fn move_vertically_between_lines() {
        let mut cursor = CursorState::new();
        let value = "first\nsecond";
        cursor.pos = value.len();
        assert!(cursor.move_vertically(value, -1, 40));
        assert_eq!(cursor.pos, 5);
        assert!(!cursor.move_vertically(value, -1, 40));
        assert!(cursor.move_vertically(value, 1, 40));
    }

    #[test]
    fn screen_pos_single_line() {
        let mut cursor = CursorState::new();
        let area = Rect::new(0, 0, 40, 3);
        cursor.pos = 3;
        assert_eq!(cursor.screen_pos("Ann", area), (5, 1));
    }

    #[test]
    fn screen_pos_after_newline() {
        let mut cursor = CursorState::new();
        let area = Rect::new(0, 0, 40, 5);
        let value = "hi\n";
        cursor.pos = value.len();
        assert_eq!(cursor.screen_pos(value, area), (2, 2));
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut cursor = CursorState::new();
        let value = "1\n2\n3\n4";
        cursor.pos = value.len();
        cursor.update_scroll_offset(value, 40, 2);
        assert_eq!(cursor.scroll_offset, 2);
        cursor.pos = 0;
        cursor.update_scroll_offset(value, 40, 2);
        assert_eq!(cursor.scroll_offset, 0);
    }
}
