use serde::{Deserialize, Serialize};

fn default_refresh_interval() -> f32 {
    10.0
}

fn default_palette_category() -> String {
    "Deep Learning Workspace".to_string()
}

fn default_tracker_namespace() -> String {
    "experiments".to_string()
}

fn default_notebook_selector() -> String {
    ".nb-notebook".to_string()
}

fn default_submit_menu_rank() -> f32 {
    -0.5
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Seconds between automatic experiment-list refreshes. Non-positive
    /// disables the periodic refresh entirely.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: f32,
    /// Palette category the open command is listed under.
    #[serde(default = "default_palette_category")]
    pub palette_category: String,
    /// Namespace handed to the layout restorer; also the panel's restore
    /// name.
    #[serde(default = "default_tracker_namespace")]
    pub tracker_namespace: String,
    /// Context-menu selector matching notebook editors.
    #[serde(default = "default_notebook_selector")]
    pub notebook_selector: String,
    #[serde(default = "default_submit_menu_rank")]
    pub submit_menu_rank: f32,
    /// When enabled the logger is initialised at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            palette_category: default_palette_category(),
            tracker_namespace: default_tracker_namespace(),
            notebook_selector: default_notebook_selector(),
            submit_menu_rank: default_submit_menu_rank(),
            debug_logging: false,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
