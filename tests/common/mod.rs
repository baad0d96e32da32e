#![allow(dead_code)]

use experiment_panel::controller::PanelController;
use experiment_panel::host::{
    CommandCallback, CommandPalette, CommandRegistry, ContextMenu, ExperimentWidget,
    LayoutRestorer, Region, RestorationTracker, RestorePlan, Shell, WidgetFactory,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const WIDGET_ID: &str = "notebook-experiments";

/// Panel double counting `update` calls. Attachment state is shared with
/// the [`RecordingShell`], which flips it on `add` the way the real host
/// does.
pub struct CountingWidget {
    attached: Arc<AtomicBool>,
    updates: AtomicUsize,
}

impl CountingWidget {
    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }
}

impl ExperimentWidget for CountingWidget {
    fn id(&self) -> &str {
        WIDGET_ID
    }

    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn update(&self) {
        self.updates.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct SharedFactory {
    widget: Arc<CountingWidget>,
    created: AtomicUsize,
}

impl SharedFactory {
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl WidgetFactory for SharedFactory {
    fn create(&self) -> Arc<dyn ExperimentWidget> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Arc::clone(&self.widget) as Arc<dyn ExperimentWidget>
    }
}

pub struct RecordingShell {
    attached: Arc<AtomicBool>,
    adds: Mutex<Vec<(String, Region)>>,
    activations: Mutex<Vec<String>>,
}

impl RecordingShell {
    pub fn adds(&self) -> Vec<(String, Region)> {
        self.adds.lock().unwrap().clone()
    }

    pub fn adds_to(&self, region: Region) -> usize {
        self.adds
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, r)| *r == region)
            .count()
    }

    pub fn activations(&self) -> Vec<String> {
        self.activations.lock().unwrap().clone()
    }
}

impl Shell for RecordingShell {
    fn add(&self, widget: &Arc<dyn ExperimentWidget>, region: Region) {
        self.adds
            .lock()
            .unwrap()
            .push((widget.id().to_string(), region));
        self.attached.store(true, Ordering::SeqCst);
    }

    fn activate_by_id(&self, id: &str) {
        self.activations.lock().unwrap().push(id.to_string());
    }
}

pub struct RecordingTracker {
    members: Mutex<Vec<String>>,
}

impl RecordingTracker {
    pub fn count_for(&self, widget_id: &str) -> usize {
        self.members
            .lock()
            .unwrap()
            .iter()
            .filter(|id| id.as_str() == widget_id)
            .count()
    }
}

impl RestorationTracker for RecordingTracker {
    fn has(&self, widget_id: &str) -> bool {
        self.count_for(widget_id) > 0
    }

    fn add(&self, widget: &Arc<dyn ExperimentWidget>) {
        self.members.lock().unwrap().push(widget.id().to_string());
    }
}

pub struct Harness {
    pub controller: Arc<PanelController>,
    pub widget: Arc<CountingWidget>,
    pub factory: Arc<SharedFactory>,
    pub shell: Arc<RecordingShell>,
    pub tracker: Arc<RecordingTracker>,
}

pub fn harness() -> Harness {
    let attached = Arc::new(AtomicBool::new(false));
    let widget = Arc::new(CountingWidget {
        attached: Arc::clone(&attached),
        updates: AtomicUsize::new(0),
    });
    let factory = Arc::new(SharedFactory {
        widget: Arc::clone(&widget),
        created: AtomicUsize::new(0),
    });
    let shell = Arc::new(RecordingShell {
        attached,
        adds: Mutex::new(Vec::new()),
        activations: Mutex::new(Vec::new()),
    });
    let tracker = Arc::new(RecordingTracker {
        members: Mutex::new(Vec::new()),
    });
    let controller = Arc::new(PanelController::new(
        Arc::clone(&shell) as Arc<dyn Shell>,
        Arc::clone(&tracker) as Arc<dyn RestorationTracker>,
        Arc::clone(&factory) as Arc<dyn WidgetFactory>,
    ));
    Harness {
        controller,
        widget,
        factory,
        shell,
        tracker,
    }
}

#[derive(Default)]
pub struct RecordingCommands {
    registered: Mutex<Vec<(String, String)>>,
    callbacks: Mutex<Vec<CommandCallback>>,
}

impl RecordingCommands {
    pub fn registered(&self) -> Vec<(String, String)> {
        self.registered.lock().unwrap().clone()
    }

    pub fn invoke(&self, name: &str) {
        let registered = self.registered.lock().unwrap();
        let callbacks = self.callbacks.lock().unwrap();
        for (idx, (cmd, _)) in registered.iter().enumerate() {
            if cmd == name {
                callbacks[idx]();
            }
        }
    }
}

impl CommandRegistry for RecordingCommands {
    fn add_command(&self, name: &str, label: &str, execute: CommandCallback) {
        self.registered
            .lock()
            .unwrap()
            .push((name.to_string(), label.to_string()));
        self.callbacks.lock().unwrap().push(execute);
    }
}

#[derive(Default)]
pub struct RecordingPalette {
    pub items: Mutex<Vec<(String, String)>>,
}

impl CommandPalette for RecordingPalette {
    fn add_item(&self, command: &str, category: &str) {
        self.items
            .lock()
            .unwrap()
            .push((command.to_string(), category.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingMenu {
    pub items: Mutex<Vec<(String, String, f32)>>,
}

impl ContextMenu for RecordingMenu {
    fn add_item(&self, selector: &str, command: &str, rank: f32) {
        self.items
            .lock()
            .unwrap()
            .push((selector.to_string(), command.to_string(), rank));
    }
}

#[derive(Default)]
pub struct RecordingRestorer {
    pub plans: Mutex<Vec<(String, RestorePlan)>>,
}

impl LayoutRestorer for RecordingRestorer {
    fn restore(&self, namespace: &str, plan: RestorePlan) {
        self.plans
            .lock()
            .unwrap()
            .push((namespace.to_string(), plan));
    }
}
