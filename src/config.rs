//! Canvas configuration persistence
//!
//! Stores user preferences in `~/.config/codecanvas/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::state::{DEFAULT_FONT_SIZE, DEFAULT_PADDING};
use crate::theme::ThemeId;

/// Startup preferences that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Theme selected on a fresh canvas
    #[serde(default)]
    pub theme: ThemeId,
    #[serde(default = "default_padding")]
    pub padding: i32,
    #[serde(default = "default_font_size")]
    pub font_size: i32,
    #[serde(default)]
    pub show_line_numbers: bool,
    /// Index into the background list (wraps)
    #[serde(default)]
    pub background: usize,
    /// Monospace TTF/OTF used to draw code; without it glyphs are skipped
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    /// Where exported PNGs are written (defaults to the working directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_padding() -> i32 {
    DEFAULT_PADDING
}

fn default_font_size() -> i32 {
    DEFAULT_FONT_SIZE
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeId::default(),
            padding: default_padding(),
            font_size: default_font_size(),
            show_line_numbers: false,
            background: 0,
            font_path: None,
            output_dir: None,
        }
    }
}

impl AppConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Directory exported images are written to
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
