//! Dock configuration persistence
//!
//! Stores metrics in `~/.config/simple-dock/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Pixel metrics shared by geometry, zones and the resize solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockConfig {
    /// Height of a leaf's tab strip, also the smallest height a leaf may shrink to
    #[serde(default = "default_header_height")]
    pub header_height: f64,

    /// Gap between siblings, where the resize handles live
    #[serde(default = "default_grid_gap")]
    pub grid_gap: f64,

    /// Estimated width of one tab, for placing tab insertion slots
    #[serde(default = "default_tab_width")]
    pub tab_width: f64,

    /// Viewport used when no host measures the layout (width, height)
    #[serde(default = "default_viewport")]
    pub viewport: [f64; 2],
}

fn default_header_height() -> f64 {
    32.0
}

fn default_grid_gap() -> f64 {
    3.0
}

fn default_tab_width() -> f64 {
    96.0
}

fn default_viewport() -> [f64; 2] {
    [1280.0, 800.0]
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            header_height: default_header_height(),
            grid_gap: default_grid_gap(),
            tab_width: default_tab_width(),
            viewport: default_viewport(),
        }
    }
}

impl DockConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults if unusable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<DockConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
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

    /// Save config to a file
    ///
    /// Creates the parent directory if it doesn't exist.
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

    /// Replace negative or non-finite metrics with their defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fix = |value: f64, fallback: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                tracing::warn!("Ignoring invalid config value {}", value);
                fallback
            }
        };
        self.header_height = fix(self.header_height, defaults.header_height);
        self.grid_gap = fix(self.grid_gap, defaults.grid_gap);
        self.tab_width = fix(self.tab_width, defaults.tab_width);
        self.viewport[0] = fix(self.viewport[0], defaults.viewport[0]);
        self.viewport[1] = fix(self.viewport[1], defaults.viewport[1]);
        self
    }
}
