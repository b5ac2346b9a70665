//! Platform-specific directory utilities.

use std::path::PathBuf;

/// Default save directory.
///
/// - macOS: `~/Library/Application Support/keystrike/saves`
/// - Linux: `~/.local/share/keystrike/saves` (or `$XDG_DATA_HOME/keystrike/saves`)
/// - Windows: `%APPDATA%\keystrike\saves`
/// - Fallback: `./saves`
pub fn save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "keystrike")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./saves"))
}
