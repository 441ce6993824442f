//! Runtime settings resolved and validated from configuration.

use crate::domain::error::LedgerError;
use crate::ports::config_port::ConfigPort;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_JSON_PATH: &str = "finance_data.json";
pub const DEFAULT_SQLITE_PATH: &str = "ledger.db";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8000";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Json,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend: StorageBackend,
    pub json_path: PathBuf,
    pub sqlite_path: PathBuf,
    pub pool_size: u32,
    /// Start from the demo dataset rather than an empty ledger when no
    /// snapshot can be loaded.
    pub seed: bool,
    pub listen: SocketAddr,
    pub log_filter: String,
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, LedgerError> {
        let backend = parse_backend(config)?;
        let pool_size = parse_pool_size(config)?;
        let listen = parse_listen(config)?;

        Ok(Settings {
            backend,
            json_path: config
                .get_string("storage", "json_path")
                .unwrap_or_else(|| DEFAULT_JSON_PATH.to_string())
                .into(),
            sqlite_path: config
                .get_string("storage", "sqlite_path")
                .unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string())
                .into(),
            pool_size,
            seed: config.get_bool("storage", "seed", true),
            listen,
            log_filter: config
                .get_string("logging", "filter")
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

fn parse_backend(config: &dyn ConfigPort) -> Result<StorageBackend, LedgerError> {
    match config.get_string("storage", "backend") {
        None => Ok(StorageBackend::Json),
        Some(value) => match value.trim().to_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => Err(LedgerError::ConfigInvalid {
                section: "storage".to_string(),
                key: "backend".to_string(),
                reason: format!("unknown backend '{other}', expected json or sqlite"),
            }),
        },
    }
}

fn parse_pool_size(config: &dyn ConfigPort) -> Result<u32, LedgerError> {
    let value = config.get_int("storage", "pool_size", 4);
    if value < 1 || value > i64::from(u32::MAX) {
        return Err(LedgerError::ConfigInvalid {
            section: "storage".to_string(),
            key: "pool_size".to_string(),
            reason: "pool_size must be a positive integer".to_string(),
        });
    }
    Ok(value as u32)
}

fn parse_listen(config: &dyn ConfigPort) -> Result<SocketAddr, LedgerError> {
    let raw = config
        .get_string("web", "listen")
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
    raw.trim().parse().map_err(|_| LedgerError::ConfigInvalid {
        section: "web".to_string(),
        key: "listen".to_string(),
        reason: format!("'{raw}' is not a socket address"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapConfig(HashMap<(String, String), String>);

    impl MapConfig {
        fn with(mut self, section: &str, key: &str, value: &str) -> Self {
            self.0
                .insert((section.to_string(), key.to_string()), value.to_string());
            self
        }
    }

    impl ConfigPort for MapConfig {
        fn get_string(&self, section: &str, key: &str) -> Option<String> {
            self.0.get(&(section.to_string(), key.to_string())).cloned()
        }

        fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
            self.get_string(section, key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
            self.get_string(section, key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }
    }

    #[test]
    fn empty_config_yields_defaults() {
        let settings = Settings::from_config(&MapConfig::default()).unwrap();
        assert_eq!(settings.backend, StorageBackend::Json);
        assert_eq!(settings.json_path, PathBuf::from(DEFAULT_JSON_PATH));
        assert_eq!(settings.pool_size, 4);
        assert!(settings.seed);
        assert_eq!(settings.listen, DEFAULT_LISTEN.parse::<SocketAddr>().unwrap());
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn backend_is_case_insensitive() {
        let config = MapConfig::default().with("storage", "backend", "SQLite");
        let settings = Settings::from_config(&config).unwrap();
        assert_eq!(settings.backend, StorageBackend::Sqlite);
    }

    #[test]
    fn unknown_backend_rejected() {
        let config = MapConfig::default().with("storage", "backend", "postgres");
        let err = Settings::from_config(&config).unwrap_err();
        assert!(matches!(err, LedgerError::ConfigInvalid { ref key, .. } if key == "backend"));
    }

    #[test]
    fn zero_pool_size_rejected() {
        let config = MapConfig::default().with("storage", "pool_size", "0");
        assert!(Settings::from_config(&config).is_err());
    }

    #[test]
    fn bad_listen_address_rejected() {
        let config = MapConfig::default().with("web", "listen", "localhost");
        let err = Settings::from_config(&config).unwrap_err();
        assert!(matches!(err, LedgerError::ConfigInvalid { ref section, .. } if section == "web"));
    }

    #[test]
    fn seed_can_be_disabled() {
        let config = MapConfig::default().with("storage", "seed", "false");
        assert!(!Settings::from_config(&config).unwrap().seed);
    }
}
