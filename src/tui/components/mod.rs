//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TabBar`: Application name and the two tabs
//! - `StatusBar`: Backend address, health, queue label and key hints
//! - `MessageCard`: One received message
//! - `ConfirmDialog`: Yes/no overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! Transient wrappers around persistent presentation state, emitting events:
//! - `TextField`: Bordered wrapping text input (value owned by core)
//! - `Composer`: The Send tab form
//! - `MessageList`: The List tab with filter and scrollable cards
//!
//! Components receive external data as props rather than reading `App`
//! directly, and report user intent as events the event loop turns into
//! `core::Action`s.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── tab_bar.rs
//! ├── status_bar.rs
//! ├── confirm.rs
//! ├── composer.rs
//! ├── message_card.rs
//! ├── message_list.rs
//! └── text_field/      (cursor + wrapping helpers)
//! ```

pub mod composer;
pub mod confirm;
pub mod message_card;
pub mod message_list;
pub mod status_bar;
pub mod tab_bar;
pub mod text_field;

pub use composer::{Composer, ComposerEvent, ComposerViewState};
pub use confirm::ConfirmDialog;
pub use message_list::{MessageList, MessageListState, ViewerEvent};
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Braille spinner glyph for the given animation frame.
pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}
