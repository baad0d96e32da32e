use std::sync::Arc;

use crate::controller::PanelController;
use crate::host::{CommandPalette, CommandRegistry, ContextMenu, LayoutRestorer, RestorePlan};
use crate::settings::Settings;

/// Command opening (or re-surfacing) the experiments panel.
pub const OPEN_EXPERIMENTS_COMMAND: &str = "experiments:open";
pub const OPEN_EXPERIMENTS_LABEL: &str = "Notebook Experiments";

/// Command submitting the current notebook for remote execution. Owned by
/// the submit button collaborator; this crate only exposes it on the
/// notebook context menu.
pub const SUBMIT_NOTEBOOK_COMMAND: &str = "notebook:submit";

/// Wire the extension into the host: the open command, its palette entry,
/// the notebook submit context-menu item and the layout-restoration plan.
pub fn register_extension(
    commands: &dyn CommandRegistry,
    palette: &dyn CommandPalette,
    context_menu: &dyn ContextMenu,
    restorer: &dyn LayoutRestorer,
    controller: Arc<PanelController>,
    settings: &Settings,
) {
    tracing::info!("notebook experiments extension activated");

    context_menu.add_item(
        &settings.notebook_selector,
        SUBMIT_NOTEBOOK_COMMAND,
        settings.submit_menu_rank,
    );

    let open_controller = Arc::clone(&controller);
    commands.add_command(
        OPEN_EXPERIMENTS_COMMAND,
        OPEN_EXPERIMENTS_LABEL,
        Box::new(move || {
            if let Err(err) = open_controller.open() {
                tracing::error!(?err, "failed to open experiment panel");
            }
        }),
    );

    palette.add_item(OPEN_EXPERIMENTS_COMMAND, &settings.palette_category);

    restorer.restore(
        &settings.tracker_namespace,
        RestorePlan::for_command(OPEN_EXPERIMENTS_COMMAND, &settings.tracker_namespace),
    );
}
