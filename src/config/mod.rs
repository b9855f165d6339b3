//! Configuration management for the ticker.

mod settings;

pub use settings::{
    FONT_SIZE_CHOICES, OPACITY_CHOICES, REFRESH_INTERVAL_CHOICES, SCROLL_SPEED_CHOICES,
    TickerConfig, normalize_symbols,
};

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// File name of the persisted preferences.
pub const CONFIG_FILE_NAME: &str = ".ticker-config.json";

/// Get the preferences file path: beside the executable, or in the
/// platform config directory when the executable location is unknown.
pub fn config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .or_else(|| config_dir().ok().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Get the configuration directory path.
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "tickerbar", "tickerbar")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| Error::config("Could not determine config directory"))
}

/// Get the log directory path.
pub fn log_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "tickerbar", "tickerbar")
        .map(|dirs| dirs.data_dir().join("logs"))
        .ok_or_else(|| Error::config("Could not determine log directory"))
}
