//! # Application State
//!
//! Core business state for Courier. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── tab: Tab                       // Send | List
//! ├── composer: ComposerState        // draft + send status
//! ├── viewer: ViewerState            // cached list, filter, auto-refresh
//! ├── viewer_epoch: u64              // bumped whenever the viewer mounts/unmounts
//! ├── list_switch_prompt: bool       // "switch to the list?" dialog open
//! ├── health: Health                 // last backend health probe
//! └── settings: Settings             // resolved config the reducer needs
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::composer::ComposerState;
use crate::core::config::ResolvedConfig;
use crate::core::viewer::ViewerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Send,
    List,
}

impl Tab {
    pub fn other(self) -> Self {
        match self {
            Tab::Send => Tab::List,
            Tab::List => Tab::Send,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Send => "Send message",
            Tab::List => "Message list",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Health {
    #[default]
    Unknown,
    Checking,
    Up(String),
    Down(String),
}

/// The slice of resolved configuration the reducer consults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub auto_refresh_on_open: bool,
    pub prompt_switch_after_send: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_refresh_on_open: false,
            prompt_switch_after_send: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct App {
    pub tab: Tab,
    pub composer: ComposerState,
    pub viewer: ViewerState,
    pub viewer_epoch: u64,
    pub list_switch_prompt: bool,
    pub health: Health,
    pub settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(Settings {
            auto_refresh_on_open: config.auto_refresh,
            prompt_switch_after_send: config.prompt_switch_after_send,
        })
    }

    /// Whether a response tagged with `epoch` still belongs to the mounted viewer.
    pub fn is_current_viewer(&self, epoch: u64) -> bool {
        self.tab == Tab::List && epoch == self.viewer_epoch
    }

    /// The timer should run exactly when this is true.
    pub fn wants_auto_refresh(&self) -> bool {
        self.tab == Tab::List && self.viewer.auto_refresh
    }

    /// A modal dialog currently owns the keyboard.
    pub fn has_dialog(&self) -> bool {
        self.list_switch_prompt || self.viewer.confirm_clear
    }

    /// Something is in flight; the TUI animates a spinner.
    pub fn is_busy(&self) -> bool {
        self.composer.is_sending()
            || self.viewer.fetching
            || self.viewer.clearing
            || self.health == Health::Checking
    }
}
