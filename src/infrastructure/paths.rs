//! Path helpers for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Sandbox mount point of the host directory Zellij was started from,
/// usually the user's home.
const HOST_ROOT: &str = "/host";

/// Directory holding the trace file.
///
/// Resolves to `~/.local/share/zellij/truthlens` on the host when Zellij was
/// started from the home directory.
///
/// ```
/// use truthlens::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/truthlens"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("truthlens")
}

/// Maps a user-supplied path to its sandbox location.
///
/// `~` and `~/...` are rewritten under `/host`; anything else is returned
/// as given.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => PathBuf::from(HOST_ROOT),
        Some(rest) if rest.starts_with('/') => PathBuf::from(format!("{HOST_ROOT}{rest}")),
        _ => PathBuf::from(path),
    }
}
