//! # Viewer
//!
//! The message-listing feature: the cached list from the last successful
//! fetch, the live filter, and display helpers for message cards.
//!
//! The list is a cache, not a source of truth. Every successful fetch
//! replaces it wholesale and bumps `revision`, which is what the filter
//! memo keys on.

use chrono::{DateTime, NaiveDateTime, TimeZone};

use crate::api::{ApiError, Message, Timestamp};
use crate::core::composer::Status;

pub const NO_TIMESTAMP: &str = "No data";
pub const ANONYMOUS: &str = "Anonymous";
pub const EMPTY_CONTENT: &str = "Empty message";
pub const CLEARED_TEXT: &str = "All messages deleted";
const LIST_REJECTED_TEXT: &str = "Could not retrieve messages";

/// How many trailing id characters a card shows.
const SHORT_ID_CHARS: usize = 8;

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

#[derive(Debug, Default)]
pub struct ViewerState {
    pub messages: Vec<Message>,
    /// Bumped on every replacement of `messages`.
    pub revision: u64,
    pub filter: String,
    pub auto_refresh: bool,
    pub status: Status,
    /// A list fetch is in flight.
    pub fetching: bool,
    /// A clear request is in flight.
    pub clearing: bool,
    /// The clear confirmation dialog is open.
    pub confirm_clear: bool,
}

impl ViewerState {
    pub fn new(auto_refresh: bool) -> Self {
        Self {
            auto_refresh,
            ..Default::default()
        }
    }

    pub fn replace_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.revision += 1;
    }

    pub fn can_clear(&self) -> bool {
        !self.messages.is_empty() && !self.clearing
    }
}

// ============================================================================
// Filtering
// ============================================================================

/// Whether a message matches a lowercased needle on sender or content.
fn matches_needle(message: &Message, needle: &str) -> bool {
    let hit = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(needle))
    };
    hit(&message.sender) || hit(&message.content)
}

/// Indices of messages whose sender or content contains `filter`, case-insensitively.
/// An empty filter keeps everything.
pub fn matching_indices(messages: &[Message], filter: &str) -> Vec<usize> {
    if filter.is_empty() {
        return (0..messages.len()).collect();
    }
    let needle = filter.to_lowercase();
    messages
        .iter()
        .enumerate()
        .filter(|(_, message)| matches_needle(message, &needle))
        .map(|(index, _)| index)
        .collect()
}

/// The filtered view of `messages`. Never mutates the list.
pub fn filter_messages<'a>(messages: &'a [Message], filter: &str) -> Vec<&'a Message> {
    matching_indices(messages, filter)
        .into_iter()
        .map(|index| &messages[index])
        .collect()
}

/// Caches the filtered indices keyed by (list revision, filter text).
#[derive(Debug, Default)]
pub struct FilterMemo {
    key: Option<(u64, String)>,
    indices: Vec<usize>,
    recomputations: usize,
}

impl FilterMemo {
    pub fn indices(&mut self, messages: &[Message], revision: u64, filter: &str) -> &[usize] {
        let fresh = self
            .key
            .as_ref()
            .is_some_and(|(rev, text)| *rev == revision && text == filter);
        if !fresh {
            self.indices = matching_indices(messages, filter);
            self.key = Some((revision, filter.to_string()));
            self.recomputations += 1;
        }
        &self.indices
    }

    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

// ============================================================================
// Display helpers
// ============================================================================

pub fn display_sender(message: &Message) -> &str {
    message
        .sender
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(ANONYMOUS)
}

pub fn display_content(message: &Message) -> &str {
    message
        .content
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(EMPTY_CONTENT)
}

/// `#` + the last 8 characters of the id, the whole id if shorter, or the
/// position when there is no id. Display only.
pub fn short_id(id: Option<&str>, index: usize) -> String {
    match id.filter(|id| !id.is_empty()) {
        Some(id) => {
            let count = id.chars().count();
            let tail: String = id.chars().skip(count.saturating_sub(SHORT_ID_CHARS)).collect();
            format!("#{tail}")
        }
        None => format!("#{index}"),
    }
}

/// Format a timestamp in the local time zone.
pub fn format_timestamp(timestamp: Option<&Timestamp>) -> String {
    format_timestamp_in(timestamp, &chrono::Local)
}

/// Format a timestamp in `tz`. Missing or blank values get the placeholder,
/// unparseable ones come back unmodified.
pub fn format_timestamp_in<Tz>(timestamp: Option<&Timestamp>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(timestamp) = timestamp.filter(|ts| !ts.is_blank()) else {
        return NO_TIMESTAMP.to_string();
    };

    let parsed = match timestamp {
        Timestamp::Text(text) => parse_text_timestamp(text.trim(), tz),
        Timestamp::Millis(millis) if millis.is_finite() => {
            DateTime::from_timestamp_millis(*millis as i64).map(|dt| dt.with_timezone(tz))
        }
        Timestamp::Millis(_) => None,
    };

    match parsed {
        Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
        None => timestamp.to_string(),
    }
}

fn parse_text_timestamp<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(tz));
    }
    // Zone-less date-times are taken as wall-clock time in `tz`
    let naive = text
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;
    tz.from_local_datetime(&naive).earliest()
}

// ============================================================================
// Error text
// ============================================================================

/// User-facing text for a failed list fetch.
pub fn list_error_text(error: &ApiError) -> String {
    match error {
        ApiError::Rejected(_) => LIST_REJECTED_TEXT.to_string(),
        other => format!("Failed to load messages: {other}"),
    }
}

/// User-facing text for a failed clear.
pub fn clear_error_text(error: &ApiError) -> String {
    format!("Failed to delete messages: {error}")
}
