use log::{info, warn};
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub(crate) const PRESETS_FILE: &str = "aspect_presets.txt";
pub(crate) const RESOLUTIONS_FILE: &str = "base_resolutions.txt";

/// Where the preset lists live. Every field is optional, missing ones fall back to the
/// default file names in the working directory.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub(crate) struct SavedSettings {
    #[serde(default)]
    pub(crate) base_directory: Option<String>,
    #[serde(default)]
    pub(crate) presets_file: Option<String>,
    #[serde(default)]
    pub(crate) resolutions_file: Option<String>,
}

impl SavedSettings {
    // Function left sync intentionally, it runs once before the event loop
    pub(crate) fn load_settings() -> Self {
        let app_dirs = match AppDirs::new(Some("aspect-selector"), true) {
            Some(dirs) => dirs,
            None => {
                warn!("No config directory available, using default settings");
                return Self::default();
            }
        };
        Self::load_from(&app_dirs.config_dir.join("config.json")).unwrap_or_default()
    }

    fn load_from(config_file: &Path) -> Option<Self> {
        let json = std::fs::read_to_string(config_file).ok()?;
        info!("Loaded settings from {:?} with json {}", config_file, json);
        serde_json::from_str(&json)
            .map_err(|e| warn!("Ignoring invalid config {:?}: {}", config_file, e))
            .ok()
    }

    fn resolve_path(&self, file: Option<&str>, default: &str) -> PathBuf {
        Path::new(self.base_directory.as_deref().unwrap_or("./")).join(file.unwrap_or(default))
    }

    pub(crate) fn presets_path(&self) -> PathBuf {
        self.resolve_path(self.presets_file.as_deref(), PRESETS_FILE)
    }

    pub(crate) fn resolutions_path(&self) -> PathBuf {
        self.resolve_path(self.resolutions_file.as_deref(), RESOLUTIONS_FILE)
    }
}
