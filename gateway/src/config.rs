//! Gateway settings from the environment

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 18610;
pub const DEFAULT_UI_DIR: &str = "ui/dist";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid port {value:?} in {var}")]
    InvalidPort { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub port: u16,
    /// Catalog JSON; the built-in catalog when unset
    pub catalog_path: Option<PathBuf>,
    pub ui_dir: PathBuf,
}

impl GatewayConfig {
    /// `SATPOINT_GATEWAY_PORT` (or `PORT`), `SATPOINT_CATALOG`, `SATPOINT_UI_DIR`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match ["SATPOINT_GATEWAY_PORT", "PORT"]
            .into_iter()
            .find_map(|var| lookup(var).map(|value| (var, value)))
        {
            Some((var, value)) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { var, value })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            catalog_path: lookup("SATPOINT_CATALOG").map(PathBuf::from),
            ui_dir: lookup("SATPOINT_UI_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UI_DIR)),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
