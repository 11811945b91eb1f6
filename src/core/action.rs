//! # Actions
//!
//! Everything that can happen in Courier becomes an `Action`.
//! User presses Ctrl+S? That's `Action::SubmitDraft`.
//! The backend answers? That's `Action::SendFinished(result)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns the `Effect` the adapter must perform.
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The auto-refresh timer is not an effect: the adapter reconciles it with
//! `App::wants_auto_refresh()` after every update.

use log::{debug, info};

use crate::api::{ApiError, HealthReport, Message, OutgoingMessage, SendReceipt};
use crate::core::composer::{DraftField, SENT_TEXT, Status, send_error_text};
use crate::core::state::{App, Health, Tab};
use crate::core::viewer::{CLEARED_TEXT, ViewerState, clear_error_text, list_error_text};

#[derive(Debug)]
pub enum Action {
    Quit,
    SelectTab(Tab),
    ToggleTab,

    // Composer
    EditDraft { field: DraftField, value: String },
    SubmitDraft,
    SendFinished(Result<SendReceipt, ApiError>),
    /// Fired by the adapter a short delay after a successful send.
    OfferListSwitch,
    AnswerListSwitch(bool),

    // Viewer
    Refresh,
    AutoRefreshTick,
    ListLoaded {
        epoch: u64,
        result: Result<Vec<Message>, ApiError>,
    },
    ToggleAutoRefresh,
    SetFilter(String),
    RequestClear,
    AnswerClear(bool),
    ClearFinished {
        epoch: u64,
        result: Result<(), ApiError>,
    },

    // Footer
    CheckHealth,
    HealthChecked(Result<HealthReport, ApiError>),
}

/// Side effects requested by `update()`, performed by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    SendMessage(OutgoingMessage),
    FetchList { epoch: u64 },
    ClearMessages { epoch: u64 },
    ScheduleListSwitchPrompt,
    CheckHealth,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::SelectTab(tab) => select_tab(app, tab),
        Action::ToggleTab => {
            let next = app.tab.other();
            select_tab(app, next)
        }

        Action::EditDraft { field, value } => {
            // Inputs are locked while a send is in flight
            if !app.composer.is_sending() {
                app.composer.draft.set(field, value);
            }
            Effect::None
        }
        Action::SubmitDraft => submit_draft(app),
        Action::SendFinished(result) => {
            match result {
                Ok(receipt) => {
                    info!("Message sent ({:?})", receipt.message);
                    app.composer.draft.sender.clear();
                    app.composer.draft.content.clear();
                    app.composer.status = Status::Success(SENT_TEXT.to_string());
                    if app.settings.prompt_switch_after_send {
                        return Effect::ScheduleListSwitchPrompt;
                    }
                }
                Err(e) => {
                    info!("Send failed: {}", e);
                    app.composer.status = Status::Error(send_error_text(&e));
                }
            }
            Effect::None
        }
        Action::OfferListSwitch => {
            if app.tab == Tab::Send && !app.viewer.confirm_clear {
                app.list_switch_prompt = true;
            }
            Effect::None
        }
        Action::AnswerListSwitch(accept) => {
            if !app.list_switch_prompt {
                return Effect::None;
            }
            app.list_switch_prompt = false;
            if accept {
                select_tab(app, Tab::List)
            } else {
                Effect::None
            }
        }

        Action::Refresh => start_fetch(app),
        Action::AutoRefreshTick => {
            if !app.wants_auto_refresh() {
                debug!("Dropping stale auto-refresh tick");
                return Effect::None;
            }
            start_fetch(app)
        }
        Action::ListLoaded { epoch, result } => {
            if !app.is_current_viewer(epoch) {
                debug!("Discarding list response for epoch {}", epoch);
                return Effect::None;
            }
            app.viewer.fetching = false;
            match result {
                Ok(messages) => {
                    debug!("Loaded {} messages", messages.len());
                    app.viewer.replace_messages(messages);
                    app.viewer.status = Status::Idle;
                }
                Err(e) => {
                    info!("List fetch failed: {}", e);
                    app.viewer.status = Status::Error(list_error_text(&e));
                }
            }
            Effect::None
        }
        Action::ToggleAutoRefresh => {
            if app.tab == Tab::List {
                app.viewer.auto_refresh = !app.viewer.auto_refresh;
                info!("Auto-refresh {}", if app.viewer.auto_refresh { "on" } else { "off" });
            }
            Effect::None
        }
        Action::SetFilter(filter) => {
            app.viewer.filter = filter;
            Effect::None
        }
        Action::RequestClear => {
            if app.tab == Tab::List && app.viewer.can_clear() && !app.list_switch_prompt {
                app.viewer.confirm_clear = true;
            }
            Effect::None
        }
        Action::AnswerClear(accept) => {
            if !app.viewer.confirm_clear {
                return Effect::None;
            }
            app.viewer.confirm_clear = false;
            if !accept || !app.viewer.can_clear() {
                return Effect::None;
            }
            app.viewer.clearing = true;
            Effect::ClearMessages {
                epoch: app.viewer_epoch,
            }
        }
        Action::ClearFinished { epoch, result } => {
            if !app.is_current_viewer(epoch) {
                debug!("Discarding clear response for epoch {}", epoch);
                return Effect::None;
            }
            app.viewer.clearing = false;
            match result {
                Ok(()) => {
                    app.viewer.replace_messages(Vec::new());
                    app.viewer.status = Status::Success(CLEARED_TEXT.to_string());
                }
                Err(e) => {
                    info!("Clear failed: {}", e);
                    app.viewer.status = Status::Error(clear_error_text(&e));
                }
            }
            Effect::None
        }

        Action::CheckHealth => {
            if app.health == Health::Checking {
                return Effect::None;
            }
            app.health = Health::Checking;
            Effect::CheckHealth
        }
        Action::HealthChecked(result) => {
            app.health = match result {
                Ok(report) => Health::Up(report.status),
                Err(e) => Health::Down(e.to_string()),
            };
            Effect::None
        }
    }
}

/// Switching away from the list unmounts the viewer and drops its cache;
/// switching to it mounts a fresh one and loads it.
fn select_tab(app: &mut App, tab: Tab) -> Effect {
    if app.tab == tab {
        return Effect::None;
    }
    app.tab = tab;
    app.viewer_epoch += 1;
    app.viewer = ViewerState::new(app.settings.auto_refresh_on_open);
    info!("Switched to {:?} tab (viewer epoch {})", tab, app.viewer_epoch);

    match tab {
        Tab::List => start_fetch(app),
        Tab::Send => Effect::None,
    }
}

fn submit_draft(app: &mut App) -> Effect {
    if app.composer.is_sending() {
        debug!("Submit ignored: send already in flight");
        return Effect::None;
    }
    match app.composer.draft.validate() {
        Ok(body) => {
            app.composer.status = Status::Loading;
            Effect::SendMessage(body)
        }
        Err(e) => {
            app.composer.status = Status::Error(e.to_string());
            Effect::None
        }
    }
}

fn start_fetch(app: &mut App) -> Effect {
    if app.tab != Tab::List {
        return Effect::None;
    }
    if app.viewer.fetching {
        debug!("Refresh skipped: list fetch already in flight");
        return Effect::None;
    }
    app.viewer.fetching = true;
    app.viewer.status = Status::Loading;
    Effect::FetchList {
        epoch: app.viewer_epoch,
    }
}
