//! Presentation settings loaded from a TOML file.
//!
//! ```toml
//! currency_symbol = "₱"
//! message_ttl_secs = 3
//! confirm_destructive = true
//! log_level = "info"
//! log_file = "payroll.log"
//! ```
//!
//! Every key is optional; missing keys take the values of
//! [`AppConfig::default`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "payroll.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Prefix for every rendered money amount.
    pub currency_symbol: String,
    /// How long a status message stays visible.
    pub message_ttl_secs: u64,
    /// Ask before deleting a record or clearing the ledger.
    pub confirm_destructive: bool,
    /// Any `EnvFilter` directive; `RUST_LOG` still wins when set.
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₱".to_string(),
            message_ttl_secs: 3,
            confirm_destructive: true,
            log_level: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn message_ttl(&self) -> Duration {
        Duration::from_secs(self.message_ttl_secs)
    }

    /// Parses a config from TOML text.
    pub fn from_toml_str(
        input: &str,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads the config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Loads an explicitly requested file, or [`DEFAULT_CONFIG_FILE`] if it
    /// exists, or falls back to defaults.
    ///
    /// A missing file is only an error when the caller named it.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::load(path)
                } else {
                    tracing::debug!("no {} found, using default settings", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_toml_str(input, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn defaults_match_original_form() {
        let config = AppConfig::default();

        assert_eq!(config.currency_symbol, "₱");
        assert_eq!(config.message_ttl(), Duration::from_secs(3));
        assert!(config.confirm_destructive);
    }

    #[test]
    fn all_keys_are_read() {
        let config = parse(
            r#"
currency_symbol = "$"
message_ttl_secs = 10
confirm_destructive = false
log_level = "debug"
log_file = "out.log"
"#,
        )
        .unwrap();

        assert_eq!(
            config,
            AppConfig {
                currency_symbol: "$".to_string(),
                message_ttl_secs: 10,
                confirm_destructive: false,
                log_level: Some("debug".to_string()),
                log_file: Some(PathBuf::from("out.log")),
            }
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse("currency_symbol = \"€\"").unwrap();

        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.message_ttl_secs, 3);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = parse("colour = \"blue\"").unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config file 'test.toml'"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = AppConfig::resolve(Some(Path::new("definitely/not/here.toml"))).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
