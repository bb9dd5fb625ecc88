// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across SaveVault

// Storage
pub const SAVEVAULT_DATA_DIR: &str = "SAVEVAULT_DATA_DIR";

// API server
pub const SAVEVAULT_API_HOST: &str = "SAVEVAULT_API_HOST";
pub const SAVEVAULT_API_PORT: &str = "SAVEVAULT_API_PORT";
pub const PORT: &str = "PORT"; // Legacy

// CORS Configuration
pub const SAVEVAULT_CORS_ORIGIN: &str = "SAVEVAULT_CORS_ORIGIN";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_API_PORT: u16 = 4010;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_LOG_FILTER: &str = "savevault=info,tower_http=info";
