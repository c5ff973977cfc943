use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use footprint::FootprintConfig;
use serde::{Deserialize, Serialize};

/// Prefix of environment overrides, e.g. `APP__SERVER__BIND_ADDR`.
pub const ENV_PREFIX: &str = "APP__";

/// Effective server configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub footprint: FootprintConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address, `host:port`
    pub bind_addr: String,
    /// Per-request deadline
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Largest accepted request body
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_owned(),
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 16 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default `tracing` directive when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl AppConfig {
    /// Layered load: defaults, then the YAML file (if any), then `APP__*`
    /// environment variables.
    ///
    /// # Errors
    /// Returns an error if a layer cannot be read or the merged result does
    /// not deserialize.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .context("failed to load configuration")
    }

    /// Apply command-line overrides on top of the loaded layers.
    ///
    /// # Errors
    /// Returns an error if the port must be replaced but `server.bind_addr`
    /// is not a socket address.
    pub fn apply_cli_overrides(&mut self, port: Option<u16>) -> Result<()> {
        if let Some(port) = port {
            let mut addr = self.server.socket_addr()?;
            addr.set_port(port);
            self.server.bind_addr = addr.to_string();
        }
        Ok(())
    }

    /// # Errors
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;
        if self.server.request_timeout.is_zero() {
            bail!("server.request_timeout must be greater than zero");
        }
        if self.server.body_limit_bytes == 0 {
            bail!("server.body_limit_bytes must be greater than zero");
        }
        self.footprint
            .validate()
            .context("invalid footprint configuration")?;
        Ok(())
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| anyhow::anyhow!("failed to serialize configuration: {e}"))
    }
}

impl ServerConfig {
    /// # Errors
    /// Returns an error if `bind_addr` is not a `host:port` socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("invalid server.bind_addr '{}'", self.bind_addr))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:5000");
        assert_eq!(config.server.request_timeout, Duration::from_secs(30));
        assert_eq!(config.server.body_limit_bytes, 16384);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.footprint.chart.width, 600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
server:
  request_timeout: "5s"
logging:
  format: json
footprint:
  chart:
    height: 300
"#;
        let config: AppConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.server.request_timeout, Duration::from_secs(5));
        assert_eq!(config.server.bind_addr, "127.0.0.1:5000");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.footprint.chart.height, 300);
        assert_eq!(config.footprint.chart.width, 600);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<AppConfig, _> = serde_saphyr::from_str("server:\n  bind: x\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  bind_addr: \"0.0.0.0:8080\"").unwrap();

        let config = AppConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_port_override() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(Some(8081)).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8081");

        config.apply_cli_overrides(None).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8081");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.server.bind_addr = "not-an-address".to_owned();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.footprint.chart.width = 5000;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.server.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = AppConfig::default().to_yaml().unwrap();
        assert!(yaml.contains("bind_addr"));
        let parsed: AppConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }
}
