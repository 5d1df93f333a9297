use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tanya::MatchConfig;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional JSON seed file with intents and books for database-less
    /// deployments
    #[serde(default)]
    pub seed_file: Option<String>,

    /// Matching thresholds passed to the engine
    #[serde(default)]
    pub matching: MatchConfig,

    /// Database connection settings. Only used when the server is built with
    /// the `backend-postgres` feature; otherwise the in-memory stores serve.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

/// Database connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default = "default_db_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_db_name")]
    pub dbname: String,
    #[serde(default = "default_db_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            seed_file: None,
            matching: MatchConfig::default(),
            database: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: String::new(),
            dbname: default_db_name(),
            connect_timeout_secs: default_db_connect_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("tanya-server").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("TANYA_SERVER").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.matching.validate()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_name() -> String {
    "tanya".to_string()
}

fn default_db_connect_timeout_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 5000);
        assert!(cfg.enable_cors);
        assert!(cfg.database.is_none());
        assert!(cfg.matching.validate().is_ok());
    }

    #[test]
    fn config_deserializes_from_partial_json() {
        let cfg: ServerConfig = serde_json::from_str(
            r#"{"port": 8080, "matching": {"intent_threshold": 55.0}}"#,
        )
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.matching.intent_threshold, 55.0);
        assert_eq!(cfg.matching.title_threshold, 75.0);
    }

    #[test]
    fn socket_addr_parses() {
        let cfg = ServerConfig {
            bind_addr: "127.0.0.1".into(),
            port: 9000,
            ..ServerConfig::default()
        };
        assert_eq!(cfg.socket_addr().unwrap().port(), 9000);
    }
}
