//! # Auto-refresh timer
//!
//! A background tokio interval that feeds `Action::AutoRefreshTick` into the
//! event loop. The loop calls `sync()` after every update so the timer runs
//! exactly while `App::wants_auto_refresh()` holds.
//!
//! - At most one timer runs at a time; starting a running timer is a no-op.
//! - The first tick arrives one full period after start, never immediately.
//! - Stopping (or dropping) aborts the task, so no tick is delivered afterwards.

use std::sync::mpsc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::core::action::Action;

#[derive(Debug, Default)]
pub struct AutoRefresh {
    handle: Option<JoinHandle<()>>,
}

impl AutoRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start ticking every `period`. Ignored when already running.
    pub fn start(&mut self, period: Duration, tx: mpsc::Sender<Action>) {
        if self.is_running() {
            return;
        }
        let Some(first_tick) = Instant::now().checked_add(period) else {
            warn!("Auto-refresh period {:?} is out of range, not starting", period);
            return;
        };
        info!("Auto-refresh started ({}s)", period.as_secs_f32());
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval_at(first_tick, period);
            // A slow terminal frame must not trigger a burst of catch-up fetches
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                debug!("Auto-refresh tick");
                if tx.send(Action::AutoRefreshTick).is_err() {
                    debug!("Auto-refresh receiver dropped, stopping");
                    return;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("Auto-refresh stopped");
        }
    }

    /// Bring the timer in line with `wanted`.
    pub fn sync(&mut self, wanted: bool, period: Duration, tx: &mpsc::Sender<Action>) {
        match (wanted, self.is_running()) {
            (true, false) => self.start(period, tx.clone()),
            (false, true) => self.stop(),
            _ => {}
        }
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.stop();
    }
}
