// ABOUTME: Shared utility functions for SaveVault
// ABOUTME: Path helpers used by the persistence layer

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Checks if a path exists
pub async fn path_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).await.is_ok()
}

/// Temp file next to `path` used for write-then-rename saves
pub fn sibling_temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("data"));
    name.push(".tmp");
    path.with_file_name(name)
}
