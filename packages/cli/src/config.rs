use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use survey_portal_ai::AiClientConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub database_path: Option<PathBuf>,
    pub ai: AiClientConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "5000".to_string());

        let port = port_str.parse::<u16>()?;
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let database_path = env::var("DATABASE_PATH").ok().map(PathBuf::from);

        Ok(Config {
            port,
            cors_origin,
            database_path,
            ai: AiClientConfig::from_env(),
        })
    }
}
