// ABOUTME: Runtime configuration for the SaveVault server
// ABOUTME: Reads host, port, CORS origin and data directory from the environment

use std::net::IpAddr;
use std::num::ParseIntError;
use std::path::PathBuf;

use savevault_config::constants;
use savevault_config::env::{env_string_or_default, env_string_with_fallback};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub cors_origin: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host_str =
            env_string_or_default(constants::SAVEVAULT_API_HOST, constants::DEFAULT_API_HOST);
        let host = host_str
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host_str.clone()))?;

        let port = match env_string_with_fallback(constants::SAVEVAULT_API_PORT, constants::PORT) {
            Some(value) => value.parse::<u16>()?,
            None => constants::DEFAULT_API_PORT,
        };
        validate_port(port)?;

        let cors_origin =
            env_string_or_default(constants::SAVEVAULT_CORS_ORIGIN, constants::DEFAULT_CORS_ORIGIN);

        Ok(Config {
            host,
            port,
            cors_origin,
            data_dir: savevault_core::data_dir(),
        })
    }

    /// Location of the tags database inside the data directory
    pub fn tags_db_file(&self) -> PathBuf {
        savevault_core::tags_db_file_in(&self.data_dir)
    }
}

pub fn validate_port(port: u16) -> Result<u16, ConfigError> {
    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }
    Ok(port)
}
