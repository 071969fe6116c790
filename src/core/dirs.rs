use crate::core::error::{NavigatorError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "fossil-navigator";

/// Per-user configuration directory, `XDG_CONFIG_HOME` first on Unix-likes
pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|dir| dir.join(APP_DIR))
        .ok_or(NavigatorError::ConfigDirectoryNotFound)
}
