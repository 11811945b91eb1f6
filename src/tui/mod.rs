//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::Action` values, and performs the
//! `Effect`s returned by `update()` by spawning tokio tasks that report back
//! over an mpsc channel.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (send, fetch, clear or health check in flight): draws every
//!   ~80ms so the spinners animate.
//! - **Idle**: sleeps up to 250ms and only redraws on input, resize, or a
//!   background action.
//!
//! ## Viewer lifetime
//!
//! The List tab's presentation state and the auto-refresh timer follow the
//! viewer's mount epoch: every update is followed by `reconcile()`, which
//! resets the list view when the epoch moved and starts or stops the timer to
//! match `App::wants_auto_refresh()`.

mod component;
mod components;
mod event;
mod refresh;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{HttpMessageApi, MessageApi};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Tab};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ComposerEvent, ComposerViewState, ConfirmDialog, MessageListState, ViewerEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::refresh::AutoRefresh;

const BUSY_FRAME: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub composer: ComposerViewState,
    pub message_list: MessageListState,
    /// Viewer epoch the list view state belongs to
    pub viewer_epoch: u64,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            composer: ComposerViewState::new(),
            message_list: MessageListState::new(),
            viewer_epoch: 0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock // Blink timer resets on every draw
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Everything the adapter needs to carry out effects.
struct Runtime {
    api: Arc<dyn MessageApi>,
    tx: mpsc::Sender<Action>,
    switch_prompt_delay: Duration,
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn MessageApi> = Arc::new(HttpMessageApi::new(config.base_url.clone()));
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let runtime = Runtime {
        api,
        tx: tx.clone(),
        switch_prompt_delay: config.switch_prompt_delay,
    };
    let mut auto_refresh = AutoRefresh::new();

    // Probe the backend once at startup
    let effect = update(&mut app, Action::CheckHealth);
    perform(effect, &runtime);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'event_loop: loop {
        let busy = app.is_busy();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_millis() / BUSY_FRAME.as_millis()) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, &config, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if busy { BUSY_FRAME } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = action_for_event(&event, &app, &mut tui) else {
                continue;
            };
            debug!("Input action: {:?}", action);
            let effect = update(&mut app, action);
            reconcile(&app, &mut tui, &mut auto_refresh, &config, &tx);
            if effect == Effect::Quit {
                break 'event_loop;
            }
            perform(effect, &runtime);
        }

        // Handle background task results and timer ticks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            reconcile(&app, &mut tui, &mut auto_refresh, &config, &tx);
            if effect == Effect::Quit {
                break 'event_loop;
            }
            perform(effect, &runtime);
        }
    }

    auto_refresh.stop();
    info!("Courier shutting down");
    ratatui::restore();
    Ok(())
}

/// Keep presentation state and the timer in line with core state.
fn reconcile(
    app: &App,
    tui: &mut TuiState,
    auto_refresh: &mut AutoRefresh,
    config: &ResolvedConfig,
    tx: &mpsc::Sender<Action>,
) {
    if tui.viewer_epoch != app.viewer_epoch {
        tui.message_list = MessageListState::new();
        tui.viewer_epoch = app.viewer_epoch;
    }
    auto_refresh.sync(app.wants_auto_refresh(), config.refresh_interval, tx);
}

/// Translate a terminal event into a core action.
///
/// Dialogs own the keyboard while open, then global keys apply, then the
/// active tab's component gets the event.
fn action_for_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    if app.list_switch_prompt {
        return ConfirmDialog::new(ui::SWITCH_PROMPT_TITLE, ui::SWITCH_PROMPT_QUESTION)
            .handle_event(event)
            .map(Action::AnswerListSwitch);
    }
    if app.viewer.confirm_clear {
        return ConfirmDialog::new(ui::CLEAR_TITLE, ui::CLEAR_QUESTION)
            .handle_event(event)
            .map(Action::AnswerClear);
    }

    match event {
        TuiEvent::SelectSendTab => return Some(Action::SelectTab(Tab::Send)),
        TuiEvent::SelectListTab => return Some(Action::SelectTab(Tab::List)),
        TuiEvent::ToggleTab => return Some(Action::ToggleTab),
        TuiEvent::CheckHealth => return Some(Action::CheckHealth),
        _ => {}
    }

    match app.tab {
        Tab::Send => {
            if matches!(event, TuiEvent::SubmitForm) {
                return Some(Action::SubmitDraft);
            }
            let mut composer = components::Composer::new(
                &mut tui.composer,
                &app.composer,
                "",
                "",
            );
            match composer.handle_event(event)? {
                ComposerEvent::Edited { field, value } => Some(Action::EditDraft { field, value }),
                ComposerEvent::Submit => Some(Action::SubmitDraft),
            }
        }
        Tab::List => match event {
            TuiEvent::Refresh => Some(Action::Refresh),
            TuiEvent::ToggleAutoRefresh => Some(Action::ToggleAutoRefresh),
            TuiEvent::ClearAll => Some(Action::RequestClear),
            // Esc clears a non-empty filter
            TuiEvent::Escape if !app.viewer.filter.is_empty() => {
                tui.message_list.filter_field = Default::default();
                Some(Action::SetFilter(String::new()))
            }
            _ => {
                let mut list = components::MessageList::new(
                    &mut tui.message_list,
                    &app.viewer,
                    "",
                    Duration::ZERO,
                );
                match list.handle_event(event)? {
                    ViewerEvent::FilterChanged(filter) => Some(Action::SetFilter(filter)),
                }
            }
        },
    }
}

/// Carry out an effect requested by `update()`.
fn perform(effect: Effect, runtime: &Runtime) {
    match effect {
        Effect::None | Effect::Quit => {}
        Effect::SendMessage(body) => {
            info!("Spawning send to {}", runtime.api.base_url());
            let api = runtime.api.clone();
            let tx = runtime.tx.clone();
            tokio::spawn(async move {
                let result = api.send_message(&body).await;
                if let Err(e) = &result {
                    warn!("Send request failed: {}", e);
                }
                if tx.send(Action::SendFinished(result)).is_err() {
                    warn!("Failed to deliver send result: receiver dropped");
                }
            });
        }
        Effect::FetchList { epoch } => {
            debug!("Spawning list fetch (epoch {})", epoch);
            let api = runtime.api.clone();
            let tx = runtime.tx.clone();
            tokio::spawn(async move {
                let result = api.list_messages().await;
                if let Err(e) = &result {
                    warn!("List request failed: {}", e);
                }
                if tx.send(Action::ListLoaded { epoch, result }).is_err() {
                    warn!("Failed to deliver list result: receiver dropped");
                }
            });
        }
        Effect::ClearMessages { epoch } => {
            info!("Spawning clear (epoch {})", epoch);
            let api = runtime.api.clone();
            let tx = runtime.tx.clone();
            tokio::spawn(async move {
                let result = api.clear_messages().await;
                if let Err(e) = &result {
                    warn!("Clear request failed: {}", e);
                }
                if tx.send(Action::ClearFinished { epoch, result }).is_err() {
                    warn!("Failed to deliver clear result: receiver dropped");
                }
            });
        }
        Effect::ScheduleListSwitchPrompt => {
            let delay = runtime.switch_prompt_delay;
            let tx = runtime.tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if tx.send(Action::OfferListSwitch).is_err() {
                    debug!("Switch prompt dropped: receiver gone");
                }
            });
        }
        Effect::CheckHealth => {
            let api = runtime.api.clone();
            let tx = runtime.tx.clone();
            tokio::spawn(async move {
                let result = api.health().await;
                if let Err(e) = &result {
                    warn!("Health check failed: {}", e);
                }
                if tx.send(Action::HealthChecked(result)).is_err() {
                    warn!("Failed to deliver health result: receiver dropped");
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::core::composer::DraftField;
    use crate::test_support::{StubApi, message, test_app, test_config};

    fn stub_runtime(api: StubApi) -> (Runtime, mpsc::Receiver<Action>) {
        stub_runtime_shared(Arc::new(api))
    }

    fn stub_runtime_shared(api: Arc<StubApi>) -> (Runtime, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        let runtime = Runtime {
            api,
            tx,
            switch_prompt_delay: Duration::from_millis(10),
        };
        (runtime, rx)
    }

    fn recv(rx: &mpsc::Receiver<Action>) -> Action {
        rx.recv_timeout(Duration::from_secs(2))
            .expect("background task should report back")
    }

    // -- routing -------------------------------------------------------------

    #[test]
    fn test_force_quit_always_wins() {
        let mut app = test_app();
        app.list_switch_prompt = true;
        let mut tui = TuiState::new();
        assert!(matches!(
            action_for_event(&TuiEvent::ForceQuit, &app, &mut tui),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_dialog_captures_keys() {
        let mut app = test_app();
        app.list_switch_prompt = true;
        let mut tui = TuiState::new();
        assert!(matches!(
            action_for_event(&TuiEvent::InputChar('y'), &app, &mut tui),
            Some(Action::AnswerListSwitch(true))
        ));
        // Global keys are swallowed while the dialog is open
        assert!(action_for_event(&TuiEvent::SelectListTab, &app, &mut tui).is_none());

        let mut app = test_app();
        app.tab = Tab::List;
        app.viewer.confirm_clear = true;
        assert!(matches!(
            action_for_event(&TuiEvent::Escape, &app, &mut tui),
            Some(Action::AnswerClear(false))
        ));
    }

    #[test]
    fn test_send_tab_routing() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert!(matches!(
            action_for_event(&TuiEvent::InputChar('A'), &app, &mut tui),
            Some(Action::EditDraft { field: DraftField::Sender, ref value }) if value == "A"
        ));
        assert!(matches!(
            action_for_event(&TuiEvent::SubmitForm, &app, &mut tui),
            Some(Action::SubmitDraft)
        ));
        assert!(matches!(
            action_for_event(&TuiEvent::SelectListTab, &app, &mut tui),
            Some(Action::SelectTab(Tab::List))
        ));
    }

    #[test]
    fn test_list_tab_routing() {
        let mut app = test_app();
        app.tab = Tab::List;
        let mut tui = TuiState::new();
        assert!(matches!(
            action_for_event(&TuiEvent::Refresh, &app, &mut tui),
            Some(Action::Refresh)
        ));
        assert!(matches!(
            action_for_event(&TuiEvent::ToggleAutoRefresh, &app, &mut tui),
            Some(Action::ToggleAutoRefresh)
        ));
        assert!(matches!(
            action_for_event(&TuiEvent::ClearAll, &app, &mut tui),
            Some(Action::RequestClear)
        ));
        assert!(matches!(
            action_for_event(&TuiEvent::InputChar('b'), &app, &mut tui),
            Some(Action::SetFilter(ref f)) if f == "b"
        ));

        app.viewer.filter = "bob".to_string();
        assert!(matches!(
            action_for_event(&TuiEvent::Escape, &app, &mut tui),
            Some(Action::SetFilter(ref f)) if f.is_empty()
        ));
    }

    #[test]
    fn test_ctrl_s_ignored_on_list_tab() {
        let mut app = test_app();
        app.tab = Tab::List;
        let mut tui = TuiState::new();
        assert!(action_for_event(&TuiEvent::SubmitForm, &app, &mut tui).is_none());
    }

    // -- reconcile -----------------------------------------------------------

    #[tokio::test]
    async fn test_reconcile_resets_list_view_and_runs_timer() {
        let config = ResolvedConfig {
            auto_refresh: true,
            ..test_config()
        };
        let mut app = App::from_config(&config);
        let mut tui = TuiState::new();
        let mut timer = AutoRefresh::new();
        let (tx, _rx) = mpsc::channel();

        update(&mut app, Action::SelectTab(Tab::List));
        reconcile(&app, &mut tui, &mut timer, &config, &tx);
        assert_eq!(tui.viewer_epoch, app.viewer_epoch);
        assert!(timer.is_running());

        update(&mut app, Action::SelectTab(Tab::Send));
        reconcile(&app, &mut tui, &mut timer, &config, &tx);
        assert_eq!(tui.viewer_epoch, app.viewer_epoch);
        assert!(!timer.is_running());
    }

    // -- effects -------------------------------------------------------------

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_effect_reports_list() {
        let (runtime, rx) = stub_runtime(StubApi::new(vec![message("1", "Ann", "Hi")]));
        perform(Effect::FetchList { epoch: 3 }, &runtime);
        match recv(&rx) {
            Action::ListLoaded { epoch, result } => {
                assert_eq!(epoch, 3);
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("Expected ListLoaded, got {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_send_effect_posts_draft_as_typed() {
        let api = Arc::new(StubApi::new(Vec::new()));
        let (runtime, rx) = stub_runtime_shared(api.clone());
        let body = crate::api::OutgoingMessage {
            content: "Hello ".into(),
            sender: " Ann".into(),
        };
        perform(Effect::SendMessage(body.clone()), &runtime);
        assert!(matches!(recv(&rx), Action::SendFinished(Ok(_))));
        assert_eq!(*api.sent.lock().unwrap(), vec![body]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_send_effect_reports_failure() {
        let api = Arc::new(StubApi::new(Vec::new()));
        *api.fail_with.lock().unwrap() = Some(ApiError::Network("refused".into()));
        let (runtime, rx) = stub_runtime_shared(api.clone());
        perform(
            Effect::SendMessage(crate::api::OutgoingMessage {
                content: "Hi".into(),
                sender: "Ann".into(),
            }),
            &runtime,
        );
        assert!(matches!(recv(&rx), Action::SendFinished(Err(ApiError::Network(_)))));
        assert!(api.sent.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_switch_prompt_is_delayed_offer() {
        let (runtime, rx) = stub_runtime(StubApi::new(Vec::new()));
        perform(Effect::ScheduleListSwitchPrompt, &runtime);
        assert!(matches!(recv(&rx), Action::OfferListSwitch));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_clear_and_health_effects() {
        let (runtime, rx) = stub_runtime(StubApi::new(vec![message("1", "Ann", "Hi")]));
        perform(Effect::ClearMessages { epoch: 1 }, &runtime);
        assert!(matches!(
            recv(&rx),
            Action::ClearFinished { epoch: 1, result: Ok(()) }
        ));
        perform(Effect::CheckHealth, &runtime);
        match recv(&rx) {
            Action::HealthChecked(Ok(report)) => assert_eq!(report.status, "UP"),
            other => panic!("Expected HealthChecked, got {:?}", other),
        }
    }
}
