//! User settings for the CLI: fossil executable, view filters and ignore glob.
//!
//! Stored as pretty JSON in `<config dir>/fossil-navigator/config.json`. A missing
//! file means defaults; nothing is written until [`NavigatorConfig::save`].

use crate::core::{
    dirs::get_config_directory,
    error::{NavigatorError, Result},
    projection::ViewMode,
    scanner::ScanOptions,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ViewFlags {
    pub unknown: bool,
    pub ignored: bool,
    pub modified: bool,
    pub unchanged: bool,
    pub as_list: bool,
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self {
            unknown: true,
            ignored: false,
            modified: true,
            unchanged: true,
            as_list: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NavigatorConfig {
    pub fossil_path: PathBuf,
    pub view: ViewFlags,
    pub ignore_glob: String,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            fossil_path: PathBuf::from("fossil"),
            view: ViewFlags::default(),
            ignore_glob: String::new(),
        }
    }
}

impl NavigatorConfig {
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_config_directory()?.join(CONFIG_FILE))
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| NavigatorError::config_read_failed(path, e))?;
        serde_json::from_str(&content).map_err(|e| NavigatorError::config_parse_failed(path, e))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| NavigatorError::config_write_failed(dir, e))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| NavigatorError::config_write_failed(path, e))?;
        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            show_unknown: self.view.unknown,
            show_ignored: self.view.ignored,
            show_modified: self.view.modified,
            show_unchanged: self.view.unchanged,
            ignore_glob: self.ignore_glob.clone(),
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        if self.view.as_list {
            ViewMode::List
        } else {
            ViewMode::Tree
        }
    }
}
