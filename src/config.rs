//! Runtime configuration loaded once from environment variables.

use std::net::Ipv6Addr;
use std::str::FromStr;

use thiserror::Error;

pub const HOST_ENV: &str = "MYTHOS_HTTP_HOST";
pub const PORT_ENV: &str = "MYTHOS_HTTP_PORT";
pub const LOG_LEVEL_ENV: &str = "MYTHOS_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "MYTHOS_LOG_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name} value {value:?}: expected a port number")]
    InvalidPort { name: &'static str, value: String },
    #[error("invalid {name} value {value:?}: expected `text` or `json`")]
    InvalidLogFormat { name: &'static str, value: String },
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level directive applied to this crate when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub http: HttpConfig,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            log: LogConfig {
                level: "info".to_string(),
                format: LogFormat::Text,
            },
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source. Empty values
    /// fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(host) = var(HOST_ENV) {
            config.http.host = host;
        }

        if let Some(port) = var(PORT_ENV) {
            config.http.port = port.parse().map_err(|_| ConfigError::InvalidPort {
                name: PORT_ENV,
                value: port,
            })?;
        }

        if let Some(level) = var(LOG_LEVEL_ENV) {
            config.log.level = level.to_ascii_lowercase();
        }

        if let Some(format) = var(LOG_FORMAT_ENV) {
            config.log.format = format.parse().map_err(|_| ConfigError::InvalidLogFormat {
                name: LOG_FORMAT_ENV,
                value: format,
            })?;
        }

        Ok(config)
    }

    /// `host:port` pair suitable for `TcpListener::bind`. IPv6 literals are
    /// bracketed.
    pub fn listen_addr(&self) -> String {
        let host = self.http.host.trim_start_matches('[').trim_end_matches(']');
        if host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", host, self.http.port)
        } else {
            format!("{}:{}", host, self.http.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::SocketAddr;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(load(&[]).unwrap(), Config::default());
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = load(&[(PORT_ENV, ""), (HOST_ENV, "  ")]).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_each_variable() {
        let config = load(&[
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "8081"),
            (LOG_LEVEL_ENV, "DEBUG"),
            (LOG_FORMAT_ENV, "json"),
        ])
        .unwrap();

        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 8081);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn rejects_invalid_port() {
        let err = load(&[(PORT_ENV, "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPort {
                name: PORT_ENV,
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(matches!(
            load(&[(LOG_FORMAT_ENV, "xml")]),
            Err(ConfigError::InvalidLogFormat { .. })
        ));
    }

    #[test]
    fn listen_addr_joins_host_and_port() {
        assert_eq!(Config::default().listen_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn listen_addr_brackets_ipv6_hosts() {
        let config = load(&[(HOST_ENV, "::1"), (PORT_ENV, "9000")]).unwrap();
        let addr = config.listen_addr();

        assert_eq!(addr, "[::1]:9000");
        assert!(addr.parse::<SocketAddr>().is_ok());

        let bracketed = load(&[(HOST_ENV, "[::1]")]).unwrap();
        assert_eq!(bracketed.listen_addr(), "[::1]:8080");
    }

    #[test]
    fn listen_addr_keeps_hostnames() {
        let config = load(&[(HOST_ENV, "localhost")]).unwrap();
        assert_eq!(config.listen_addr(), "localhost:8080");
    }
}
