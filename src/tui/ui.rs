use ratatui::Frame;
use ratatui::layout::{Constraint::*, Layout};

use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Tab};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Composer, ConfirmDialog, MessageList, StatusBar, TabBar};

pub const SWITCH_PROMPT_TITLE: &str = "Message sent";
pub const SWITCH_PROMPT_QUESTION: &str = "Message sent! Switch to the message list?";
pub const CLEAR_TITLE: &str = "Clear all messages";
pub const CLEAR_QUESTION: &str = "Delete all messages? This cannot be undone.";

/// Main UI drawing function: tab bar, active tab, status bar, then any dialog on top.
pub fn draw_ui(
    frame: &mut Frame,
    app: &App,
    tui: &mut TuiState,
    config: &ResolvedConfig,
    spinner_frame: usize,
) {
    let [tab_area, body_area, status_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    TabBar::new(app.tab, app.is_busy(), spinner_frame).render(frame, tab_area);

    let dimmed = app.has_dialog();
    match app.tab {
        Tab::Send => {
            let mut composer = Composer::new(
                &mut tui.composer,
                &app.composer,
                &config.queue_label,
                &config.base_url,
            );
            composer.spinner_frame = spinner_frame;
            composer.dimmed = dimmed;
            composer.render(frame, body_area);
        }
        Tab::List => {
            let mut list = MessageList::new(
                &mut tui.message_list,
                &app.viewer,
                &config.queue_label,
                config.refresh_interval,
            );
            list.spinner_frame = spinner_frame;
            list.dimmed = dimmed;
            list.render(frame, body_area);
        }
    }

    StatusBar {
        base_url: &config.base_url,
        health: &app.health,
        queue_label: &config.queue_label,
        queue_ui_url: config.queue_ui_url.as_deref(),
        tab: app.tab,
    }
    .render(frame, status_area);

    if app.list_switch_prompt {
        ConfirmDialog::new(SWITCH_PROMPT_TITLE, SWITCH_PROMPT_QUESTION).render(frame, frame.area());
    } else if app.viewer.confirm_clear {
        ConfirmDialog::new(CLEAR_TITLE, CLEAR_QUESTION)
            .destructive()
            .render(frame, frame.area());
    }
}
