//! Dashboard configuration.
//!
//! Everything except the native window options can be loaded from YAML, either
//! from an explicit path or from `~/.obd_dashboard/config.yaml`. Missing keys fall
//! back to their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::grid::DEFAULT_PANEL_COUNT;
use crate::data::window::DEFAULT_WINDOW_SIZE;
use crate::error::ConfigError;

/// Top-level configuration for the dashboard.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    // ── Charts ───────────────────────────────────────────────────────────────
    /// Number of chart slots in the grid. Fixed for the process lifetime.
    pub panel_count: usize,
    /// Rolling buffer capacity (points) per chart.
    pub window_size: usize,

    // ── Recording ────────────────────────────────────────────────────────────
    /// Write session exports straight into this directory. When unset, a save
    /// dialog asks for the location.
    pub export_dir: Option<PathBuf>,

    // ── Window / chrome ──────────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Upper bound between UI frames, in milliseconds.
    pub repaint_interval_ms: u64,
    /// Optional eframe native-window options.
    #[serde(skip)]
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            panel_count: DEFAULT_PANEL_COUNT,
            window_size: DEFAULT_WINDOW_SIZE,
            export_dir: None,
            title: "OBD Dashboard".to_string(),
            repaint_interval_ms: 16,
            native_options: None,
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.panel_count == 0 {
            return Err(ConfigError::Zero { field: "panel_count" });
        }
        if self.window_size == 0 {
            return Err(ConfigError::Zero { field: "window_size" });
        }
        Ok(())
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: DashboardConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_yaml_str(&text)
    }

    /// `~/.obd_dashboard/config.yaml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = std::env::var_os("HOME").ok_or(ConfigError::NoHome)?;
        Ok(PathBuf::from(home).join(".obd_dashboard").join("config.yaml"))
    }

    /// Load the default config file, or defaults if it does not exist.
    pub fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_path(path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = serde_yaml::to_string(self)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|source| ConfigError::Io { path: dir.to_path_buf(), source })?;
        }
        std::fs::write(path, text).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_layout() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.panel_count, 6);
        assert_eq!(cfg.window_size, 40);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let cfg = DashboardConfig::from_yaml_str("panel_count: 4\n").unwrap();
        assert_eq!(cfg.panel_count, 4);
        assert_eq!(cfg.window_size, 40);
        assert_eq!(cfg.title, "OBD Dashboard");
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = DashboardConfig::from_yaml_str("window_size: 0\n").err().unwrap();
        assert!(matches!(err, ConfigError::Zero { field: "window_size" }));
    }
}
