use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::controller::PanelController;
use crate::settings::Settings;

/// Background worker that refreshes the experiments panel on a fixed
/// period. The worker sleeps on the stop channel, so `stop` takes effect
/// within one period at most.
pub struct RefreshPoller {
    stop_tx: Sender<()>,
    join: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
}

impl RefreshPoller {
    pub fn start(controller: Arc<PanelController>, period: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel();
        let ticks = Arc::new(AtomicU64::new(0));
        let tick_count = Arc::clone(&ticks);
        let join = thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    if let Err(err) = controller.on_tick() {
                        tracing::error!(?err, "experiment panel refresh tick failed");
                    }
                    tick_count.fetch_add(1, Ordering::SeqCst);
                }
            }
        });
        tracing::debug!(?period, "refresh poller started");
        Self {
            stop_tx,
            join: Some(join),
            ticks,
        }
    }

    /// Number of completed ticks since start.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.join.is_some()
    }

    /// Stop the worker and wait for it to exit. Safe to call twice.
    pub fn stop(&mut self) {
        if let Some(join) = self.join.take() {
            let _ = self.stop_tx.send(());
            let _ = join.join();
            tracing::debug!("refresh poller stopped");
        }
    }
}

impl Drop for RefreshPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Start the periodic refresh configured by `settings`. A non-positive
/// interval disables it.
pub fn start_refresh_poller(
    controller: Arc<PanelController>,
    settings: &Settings,
) -> Option<RefreshPoller> {
    if settings.refresh_interval_secs <= 0.0 {
        tracing::debug!("periodic experiment refresh disabled by settings");
        return None;
    }
    Some(RefreshPoller::start(
        controller,
        Duration::from_secs_f32(settings.refresh_interval_secs),
    ))
}
