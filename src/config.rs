//! Application configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Data Source ===
    /// Path of the JSON data file holding the `LabRecords` section.
    #[serde(default = "default_data_path")]
    pub lab_data_path: PathBuf,

    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Port for the Prometheus exporter. Disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// Serve the generated OpenAPI document at `/openapi.json`.
    #[serde(default = "default_true")]
    pub enable_openapi: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub log_json: bool,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("mockdata.json")
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lab_data_path: default_data_path(),
            host: default_host(),
            port: default_port(),
            metrics_port: None,
            enable_openapi: default_true(),
            rust_log: default_log_level(),
            verbose: false,
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.lab_data_path.as_os_str().is_empty() {
            return Err("LAB_DATA_PATH must not be empty".to_string());
        }

        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.metrics_port == Some(self.port) {
            return Err("METRICS_PORT must differ from PORT".to_string());
        }

        Ok(())
    }

    /// Log filter: crate debug output when verbose, otherwise `rust_log`.
    ///
    /// An unparsable `rust_log` falls back to `info`.
    pub fn log_filter(&self) -> EnvFilter {
        if self.verbose {
            EnvFilter::new("lab_records=debug,info")
        } else {
            EnvFilter::try_new(&self.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
        }
    }

    /// Socket address for the HTTP server.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Socket address for the Prometheus exporter, if enabled.
    pub fn metrics_addr(&self) -> Option<SocketAddr> {
        self.metrics_port.map(|port| SocketAddr::new(self.host, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.lab_data_path, PathBuf::from("mockdata.json"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.metrics_port, None);
        assert!(config.enable_openapi);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_from_env_style_pairs() {
        let vars = vec![
            ("LAB_DATA_PATH".to_string(), "/data/labs.json".to_string()),
            ("PORT".to_string(), "9000".to_string()),
            ("METRICS_PORT".to_string(), "9100".to_string()),
            ("ENABLE_OPENAPI".to_string(), "false".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.lab_data_path, PathBuf::from("/data/labs.json"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.metrics_port, Some(9100));
        assert!(!config.enable_openapi);
        assert_eq!(config.host, default_host());
    }

    #[test]
    fn validate_rejects_empty_data_path() {
        let config = Config {
            lab_data_path: PathBuf::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_port() {
        let config = Config {
            port: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_shared_metrics_port() {
        let config = Config {
            metrics_port: Some(8080),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn log_filter_uses_rust_log() {
        let config = Config {
            rust_log: "warn".to_string(),
            ..Config::default()
        };
        assert_eq!(config.log_filter().to_string(), "warn");
    }

    #[test]
    fn log_filter_falls_back_to_info() {
        let config = Config {
            rust_log: "lab_records=loud".to_string(),
            ..Config::default()
        };
        assert_eq!(config.log_filter().to_string(), "info");
    }

    #[test]
    fn log_filter_verbose_enables_crate_debug() {
        let config = Config {
            rust_log: "warn".to_string(),
            verbose: true,
            ..Config::default()
        };
        assert!(config.log_filter().to_string().contains("lab_records=debug"));
    }

    #[test]
    fn metrics_addr_follows_host() {
        let config = Config {
            metrics_port: Some(9100),
            ..Config::default()
        };
        assert_eq!(config.metrics_addr(), Some("0.0.0.0:9100".parse().unwrap()));
        assert_eq!(config.listen_addr(), "0.0.0.0:8080".parse().unwrap());
    }
}
