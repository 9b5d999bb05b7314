use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Result;
use crate::services::catalog::DEFAULT_BOOKS_API_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    /// Base URL of the volumes catalog; overridable for staging or stubs.
    #[serde(default = "default_books_api_url")]
    pub books_api_url: String,
    /// Directory holding the persisted user-state blobs.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Config {
    /// Load from the process environment (PORT, HOST, BOOKS_API_URL,
    /// DATA_DIR), falling back to defaults for anything unset.
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_books_api_url() -> String {
    DEFAULT_BOOKS_API_URL.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.books_api_url, DEFAULT_BOOKS_API_URL);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }
}
