// Engine settings, loaded from an optional JSON file and then environment variables
use crate::error::EngineError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub csv_delimiter: String,
    pub log_level: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 5000,
            data_path: PathBuf::from("data/10k_filings.csv"),
            csv_delimiter: ",".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl EngineSettings {
    /// Reads `path` as JSON; fields absent from the file keep their defaults.
    /// With no path, the defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| {
            EngineError::ConfigError(format!("invalid config file '{}': {}", path.display(), e))
        })
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(self) -> Result<Self, EngineError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Recognised keys: FINQUERY_HOST, FINQUERY_PORT (or PORT), FINQUERY_DATA_PATH,
    /// FINQUERY_CSV_DELIMITER, LOG_LEVEL.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FINQUERY_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("FINQUERY_PORT").or_else(|| lookup("PORT")) {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| EngineError::ConfigError(format!("invalid port '{}': {}", port, e)))?;
        }
        if let Some(data_path) = lookup("FINQUERY_DATA_PATH") {
            self.data_path = PathBuf::from(data_path);
        }
        if let Some(delimiter) = lookup("FINQUERY_CSV_DELIMITER") {
            self.csv_delimiter = delimiter;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(self)
    }

    pub fn delimiter_byte(&self) -> Result<u8, EngineError> {
        match self.csv_delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(EngineError::ConfigError(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            ))),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, EngineError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| EngineError::ConfigError(format!("invalid host '{}': {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
