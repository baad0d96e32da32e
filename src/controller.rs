use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex};

use crate::host::{ExperimentWidget, Region, RestorationTracker, Shell, WidgetFactory};
use crate::lifecycle::{can_transition, PanelLifecycle};

/// Which branch an `open` call took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// First call: the widget was created, refreshed once and attached.
    Created,
    /// The widget existed but was not in the layout; it was attached.
    Attached,
    /// The widget was already attached; its data was refreshed instead.
    Refreshed,
}

struct ControllerState {
    lifecycle: PanelLifecycle,
    widget: Option<Arc<dyn ExperimentWidget>>,
}

/// Owns the single experiments panel: lazily creates it, registers it for
/// layout restoration, attaches it to the shell and keeps its data fresh.
/// `open` is driven by the host command, `on_tick` by the refresh poller;
/// the state mutex serializes the two.
pub struct PanelController {
    state: Mutex<ControllerState>,
    shell: Arc<dyn Shell>,
    tracker: Arc<dyn RestorationTracker>,
    factory: Arc<dyn WidgetFactory>,
}

impl PanelController {
    pub fn new(
        shell: Arc<dyn Shell>,
        tracker: Arc<dyn RestorationTracker>,
        factory: Arc<dyn WidgetFactory>,
    ) -> Self {
        Self {
            state: Mutex::new(ControllerState {
                lifecycle: PanelLifecycle::Uninitialized,
                widget: None,
            }),
            shell,
            tracker,
            factory,
        }
    }

    pub fn lifecycle(&self) -> PanelLifecycle {
        self.state
            .lock()
            .map(|s| s.lifecycle)
            .unwrap_or(PanelLifecycle::Uninitialized)
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle().is_created()
    }

    /// Open (or re-surface) the experiments panel. At most one widget is
    /// ever constructed; repeat calls refresh and re-activate the existing
    /// one instead.
    pub fn open(&self) -> Result<OpenOutcome> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("panel controller lock poisoned"))?;

        let mut created = false;
        let widget = match state.widget.clone() {
            Some(widget) => widget,
            None => {
                let widget = self.factory.create();
                tracing::info!(id = widget.id(), "experiment panel created");
                widget.update();
                self.transition_locked(&mut state, PanelLifecycle::Created)?;
                state.widget = Some(Arc::clone(&widget));
                created = true;
                widget
            }
        };

        if !self.tracker.has(widget.id()) {
            self.tracker.add(&widget);
        }

        let outcome = if !widget.is_attached() {
            self.shell.add(&widget, Region::Main);
            self.shell.add(&widget, Region::Right);
            self.transition_locked(&mut state, PanelLifecycle::Attached)?;
            if created {
                OpenOutcome::Created
            } else {
                OpenOutcome::Attached
            }
        } else {
            widget.update();
            if created {
                OpenOutcome::Created
            } else {
                OpenOutcome::Refreshed
            }
        };

        self.shell.activate_by_id(widget.id());
        Ok(outcome)
    }

    /// Periodic refresh. Keeps an existing panel's data current; never
    /// creates one.
    pub fn on_tick(&self) -> Result<()> {
        let state = self
            .state
            .lock()
            .map_err(|_| anyhow!("panel controller lock poisoned"))?;
        if let Some(widget) = state.widget.as_ref() {
            tracing::debug!(id = widget.id(), "timer expired, refreshing experiment list");
            widget.update();
        }
        Ok(())
    }

    fn transition_locked(&self, state: &mut ControllerState, to: PanelLifecycle) -> Result<()> {
        let from = state.lifecycle;
        if !can_transition(from, to) {
            return Err(anyhow!(
                "invalid panel lifecycle transition {from:?} -> {to:?}"
            ));
        }
        if from != to {
            tracing::debug!(?from, ?to, "panel lifecycle transition");
        }
        state.lifecycle = to;
        Ok(())
    }
}
