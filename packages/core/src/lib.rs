// ABOUTME: Core paths and utilities for SaveVault
// ABOUTME: Foundational package providing shared functionality across all SaveVault packages

pub mod constants;
pub mod utils;

// Re-export constants
pub use constants::{data_dir, tags_db_file_in, TAGS_DB_FILE_NAME};

// Re-export utilities
pub use utils::{path_exists, sibling_temp_path};
