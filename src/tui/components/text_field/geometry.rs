//! How a field's value maps onto the rows inside its bordered block, and
//! what part of typed or pasted text the field is willing to take.

use std::borrow::Cow;

use ratatui::layout::Rect;

/// Left border, one column of padding on each side, right border.
const FRAME_COLUMNS: u16 = 4;
/// Top and bottom border rows.
pub(super) const FRAME_ROWS: u16 = 2;

/// The writable region of a field drawn at a given outer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FieldGeometry {
    /// Columns available for text. Zero when the field is too narrow to show any.
    pub text_width: u16,
}

impl FieldGeometry {
    pub fn for_width(outer_width: u16) -> Self {
        Self {
            text_width: outer_width.saturating_sub(FRAME_COLUMNS),
        }
    }

    pub fn is_collapsed(self) -> bool {
        self.text_width == 0
    }

    /// Screen cell of the first character of the value.
    pub fn origin(area: Rect) -> (u16, u16) {
        (area.x + 2, area.y + 1)
    }

    /// Break `text` into display rows. Words longer than a row are split,
    /// so a sender name without spaces still fits the field.
    pub fn rows<'t>(self, text: &'t str) -> Vec<Cow<'t, str>> {
        let options = textwrap::Options::new(usize::from(self.text_width))
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        textwrap::wrap(text, options)
    }

    /// Rows the value occupies. A value ending in a newline owns one more,
    /// empty row where the cursor sits.
    pub fn row_count(self, text: &str) -> u16 {
        if self.is_collapsed() || text.is_empty() {
            return 1;
        }
        let rows = self.rows(text);
        let dangling = text.ends_with('\n') && !rows.last().is_some_and(|row| row.is_empty());
        (rows.len() as u16).max(1) + u16::from(dangling)
    }
}

/// The part of `text` a field accepts when at most `room` more characters fit.
///
/// Single-line fields drop line breaks. Multiline fields fold `\r\n` and a
/// lone `\r` into `\n`, which counts as one character against the limit.
pub(super) fn accept_input(text: &str, multiline: bool, room: usize) -> String {
    let mut accepted = String::new();
    let mut taken = 0;
    let mut chars = text.chars().peekable();
    while taken < room {
        let Some(c) = chars.next() else { break };
        let c = if c == '\r' {
            chars.next_if_eq(&'\n');
            '\n'
        } else {
            c
        };
        if c == '\n' && !multiline {
            continue;
        }
        accepted.push(c);
        taken += 1;
    }
    accepted
}
