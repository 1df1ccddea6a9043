use crate::palette::ColorScheme;
use crate::settings::EffectSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persistent application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Config format version for future compatibility
    pub version: u32,
    /// Effect settings to start with
    pub settings: EffectSettings,
    /// Color scheme to start with
    pub scheme: ColorScheme,
    /// Whether the pointer starts on autopilot
    pub autopilot: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            settings: EffectSettings::default(),
            scheme: ColorScheme::default(),
            autopilot: false,
        }
    }
}

impl AppConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
        fs::write(path, json).map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }
}

/// Default config location under the platform config directory
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("glyph-plexus").join("config.json"))
}
