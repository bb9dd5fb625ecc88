use savevault_config::constants::SAVEVAULT_DATA_DIR;
use std::env;
use std::path::{Path, PathBuf};

/// File name of the tags database inside the data directory
pub const TAGS_DB_FILE_NAME: &str = "tags.json";

/// Get the path to the SaveVault data directory (~/.savevault)
pub fn data_dir() -> PathBuf {
    if let Some(dir) = env::var_os(SAVEVAULT_DATA_DIR).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }

    // HOME first (useful for tests), then the dirs crate for normal usage
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".savevault")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".savevault")
    }
}

/// Tags database location inside `dir`
pub fn tags_db_file_in(dir: &Path) -> PathBuf {
    dir.join(TAGS_DB_FILE_NAME)
}
