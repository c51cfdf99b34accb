//! Platform-specific directory utilities

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "progression")
}

/// Platform data directory for progression content and completion records
///
/// - macOS: `~/Library/Application Support/progression`
/// - Linux: `~/.local/share/progression` (or `$XDG_DATA_HOME/progression`)
/// - Windows: `%APPDATA%\progression`
/// - Fallback: `./progression_data`
pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./progression_data"))
}

/// Platform log directory
///
/// - Linux: `~/.cache/progression/logs` (or `$XDG_CACHE_HOME/progression/logs`)
/// - Fallback: `/tmp/progression/logs`
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/progression"))
        .join("logs")
}
