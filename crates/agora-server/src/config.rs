//! Configuration loading for the Agora server.
//!
//! The configuration lives in `agora-config.yaml` in the working
//! directory. Every field has a default, so a missing file or a partial
//! file is fine.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8000
//! logging:
//!   level: info
//!   format: json
//! member_types:
//!   - { id: basic, discount: 0, monthPostsLimit: 20 }
//!   - { id: business, discount: 5, monthPostsLimit: 100 }
//! ```

use std::path::Path;

use agora_api::ServerConfig;
use agora_types::MemberType;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override holds an unusable value.
    #[error("invalid value for {var}: {value}")]
    Env {
        /// The variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Bind address.
    #[serde(default)]
    pub server: ServerConfig,

    /// Log level and output format.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Plans seeded into the member type table. Empty means the stock
    /// `basic` and `business` plans.
    #[serde(default)]
    pub member_types: Vec<MemberType>,
}

impl AppConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `AGORA_HOST` overrides `server.host`
    /// - `AGORA_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Env`] if an override cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `AGORA_HOST` / `AGORA_PORT` using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `AGORA_PORT` is not a port number.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("AGORA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("AGORA_PORT") {
            self.server.port = port.parse().map_err(|_parse_err| ConfigError::Env {
                var: "AGORA_PORT",
                value: port.clone(),
            })?;
        }
        Ok(())
    }

    /// The plans to seed, falling back to the stock set.
    pub fn seed_member_types(&self) -> Vec<MemberType> {
        if self.member_types.is_empty() {
            agora_store::default_member_types()
        } else {
            self.member_types.clone()
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = AppConfig::parse("{}").ok();
        assert_eq!(config, Some(AppConfig::default()));
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = AppConfig::parse("server:\n  port: 9001\nlogging:\n  format: json\n").ok();
        let config = config.unwrap_or_default();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn custom_member_types_replace_stock_plans() {
        let yaml = "member_types:\n  - { id: gold, discount: 15, monthPostsLimit: 500 }\n";
        let config = AppConfig::parse(yaml).ok().unwrap_or_default();
        let seeds = config.seed_member_types();
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds.first().map(|m| m.id.as_str()), Some("gold"));
    }

    #[test]
    fn no_member_types_means_stock_plans() {
        let seeds = AppConfig::default().seed_member_types();
        assert_eq!(seeds, agora_store::default_member_types());
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = AppConfig::default();
        let result = config.apply_env_overrides(|var| match var {
            "AGORA_HOST" => Some(String::from("127.0.0.1")),
            "AGORA_PORT" => Some(String::from("7070")),
            _ => None,
        });
        assert!(result.is_ok());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7070);
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_env_overrides(|var| {
            (var == "AGORA_PORT").then(|| String::from("eighty"))
        });
        assert!(matches!(result, Err(ConfigError::Env { var: "AGORA_PORT", .. })));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(AppConfig::parse("server: ["), Err(ConfigError::Yaml { .. })));
    }
}
