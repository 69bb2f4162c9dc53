//! Server configuration.
//!
//! Values are layered with figment, later sources winning:
//! 1. Built-in defaults (`127.0.0.1:8080`)
//! 2. YAML file, `config/config.yaml` unless another path is given
//! 3. Environment variables prefixed with `FUNDER_`, `__` separating keys
//!    (`FUNDER_SERVER__PORT=9000`)

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const CONFIG_PATH: &str = "config/config.yaml";

const ENV_PREFIX: &str = "FUNDER_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for `TcpListener::bind`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(None)
    }

    /// A missing file is not an error; defaults and env still apply.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self, AppError> {
        let config_file = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_PATH));

        let config: Config = Self::figment(&config_file)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_file))
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.server.host.trim().is_empty() {
            return Err(AppError::Config("server.host must not be empty".to_string()));
        }
        if self.server.port == 0 {
            return Err(AppError::Config("server.port must not be 0".to_string()));
        }
        Ok(())
    }
}
