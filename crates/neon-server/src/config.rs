use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got {0:?}")]
    InvalidPort(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub public_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("PORT").ok(),
            std::env::var("PUBLIC_DIR").ok(),
        )
    }

    /// Build from raw variable values; unset or empty values fall back to
    /// the defaults.
    pub fn from_vars(port: Option<String>, public_dir: Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(raw) = port.filter(|p| !p.trim().is_empty()) {
            cfg.port = match raw.trim().parse::<u16>() {
                Ok(p) if p > 0 => p,
                _ => return Err(ConfigError::InvalidPort(raw)),
            };
        }
        if let Some(dir) = public_dir.filter(|d| !d.trim().is_empty()) {
            cfg.public_dir = PathBuf::from(dir);
        }
        Ok(cfg)
    }
}
