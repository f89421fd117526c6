//! Filesystem locations used by Stackwatch.

use std::path::PathBuf;

use dirs_next::{config_dir, home_dir};

/// Directory name under the platform configuration directory.
pub const APP_DIR_NAME: &str = "stackwatch";

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if trimmed == "~" {
        return home();
    }
    match trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        Some(rest) => home().join(rest),
        None => PathBuf::from(trimmed),
    }
}

/// Resolve a file path, preferring a non-empty override (for example from an
/// environment variable) over `<config dir>/stackwatch/<file_name>`.
pub fn config_file_path(override_path: Option<&str>, file_name: &str) -> PathBuf {
    if let Some(path) = override_path.map(str::trim).filter(|path| !path.is_empty()) {
        return expand_tilde(path);
    }
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME).join(file_name)
}
