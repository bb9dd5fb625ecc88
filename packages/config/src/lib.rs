// ABOUTME: Configuration and environment variable management for SaveVault
// ABOUTME: Env var names plus typed parsing helpers shared by the binary and libraries

pub mod constants;
pub mod env;
