use std::sync::Arc;

use serde_json::{Map, Value};

/// Named layout areas of the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Main,
    Right,
}

/// The experiments panel as seen by the controller. The widget renders the
/// experiment list itself; `update` asks it to re-fetch and redraw, and may
/// be called before or after the widget is attached to the shell.
pub trait ExperimentWidget: Send + Sync {
    /// Stable identity used for activation and layout restoration.
    fn id(&self) -> &str;
    fn is_attached(&self) -> bool;
    fn update(&self);
}

/// Creates the concrete panel widget on first open.
pub trait WidgetFactory: Send + Sync {
    fn create(&self) -> Arc<dyn ExperimentWidget>;
}

/// Shell layout manager. `add` places a widget into a region and must
/// tolerate being called again for a widget that is already present.
pub trait Shell: Send + Sync {
    fn add(&self, widget: &Arc<dyn ExperimentWidget>, region: Region);
    fn activate_by_id(&self, id: &str);
}

/// Registry of widgets the host recreates across restarts. Membership is
/// keyed by the widget's stable id.
pub trait RestorationTracker: Send + Sync {
    fn has(&self, widget_id: &str) -> bool;
    fn add(&self, widget: &Arc<dyn ExperimentWidget>);
}

pub type CommandCallback = Box<dyn Fn() + Send + Sync>;

/// Host command registry; the callback is invoked with no arguments.
pub trait CommandRegistry: Send + Sync {
    fn add_command(&self, name: &str, label: &str, execute: CommandCallback);
}

pub trait CommandPalette: Send + Sync {
    fn add_item(&self, command: &str, category: &str);
}

pub trait ContextMenu: Send + Sync {
    fn add_item(&self, selector: &str, command: &str, rank: f32);
}

/// How the host should bring the panel back after a restart: re-run the
/// open command with the given args under a stable name.
#[derive(Debug, Clone, PartialEq)]
pub struct RestorePlan {
    pub command: String,
    pub args: Value,
    pub name: String,
}

impl RestorePlan {
    pub fn for_command(command: &str, name: &str) -> Self {
        Self {
            command: command.to_string(),
            args: Value::Object(Map::new()),
            name: name.to_string(),
        }
    }
}

pub trait LayoutRestorer: Send + Sync {
    fn restore(&self, namespace: &str, plan: RestorePlan);
}
