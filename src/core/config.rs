//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Trellis has a single user-scope configuration file. There is no
//! per-document scope: schemas are in-memory only, so there is nothing to
//! attach repository-style overrides to.
//!
//! # Locations
//!
//! Searched in order (first existing file wins):
//! 1. `$TRELLIS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/trellis/config.toml`
//! 3. `~/.trellis/config.toml`
//!
//! A missing config file is not an error; defaults apply.
//!
//! # Validation
//!
//! Config values are validated after parsing. Unknown keys are rejected so
//! typos surface instead of silently doing nothing.
//!
//! # Example
//!
//! ```toml
//! interactive = true
//!
//! [display]
//! echo_tree = true
//! id_width = 8
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// User configuration.
///
/// All keys are optional; accessor methods apply defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default interactive mode (overridden by CLI flags)
    pub interactive: Option<bool>,

    /// Display settings
    pub display: Option<DisplayConfig>,
}

/// Display settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Re-render the field tree after each successful mutation
    pub echo_tree: Option<bool>,

    /// Abbreviation width for displayed field ids
    pub id_width: Option<usize>,
}

impl Config {
    /// Default abbreviation width for field ids.
    pub const DEFAULT_ID_WIDTH: usize = 8;

    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error only if a config file exists but cannot be read,
    /// parsed, or validated. Absence of a file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        for path in Self::search_paths() {
            if path.is_file() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|err| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Candidate config file paths, in precedence order.
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(explicit) = std::env::var_os("TRELLIS_CONFIG") {
            paths.push(PathBuf::from(explicit));
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("trellis").join("config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".trellis").join("config.toml"));
        }
        paths
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(display) = &self.display {
            if let Some(width) = display.id_width {
                if !(4..=36).contains(&width) {
                    return Err(ConfigError::InvalidValue(format!(
                        "id_width must be between 4 and 36, got {width}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Whether the editor re-renders the tree after each mutation.
    pub fn echo_tree(&self) -> bool {
        self.display
            .as_ref()
            .and_then(|display| display.echo_tree)
            .unwrap_or(true)
    }

    /// Abbreviation width for displayed field ids.
    pub fn id_width(&self) -> usize {
        self.display
            .as_ref()
            .and_then(|display| display.id_width)
            .unwrap_or(Self::DEFAULT_ID_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.interactive.is_none());
        assert!(config.echo_tree());
        assert_eq!(config.id_width(), Config::DEFAULT_ID_WIDTH);
    }

    #[test]
    fn roundtrip() {
        let config = Config {
            interactive: Some(false),
            display: Some(DisplayConfig {
                echo_tree: Some(false),
                id_width: Some(12),
            }),
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_file_uses_defaults_elsewhere() {
        let config: Config = toml::from_str("[display]\nid_width = 6\n").unwrap();
        assert_eq!(config.id_width(), 6);
        assert!(config.echo_tree());
        assert!(config.interactive.is_none());
    }

    #[test]
    fn reject_unknown_fields() {
        let result: Result<Config, _> = toml::from_str("colour = true\n");
        assert!(result.is_err());

        let result: Result<Config, _> = toml::from_str("[display]\nwidth = 8\n");
        assert!(result.is_err());
    }

    #[test]
    fn id_width_bounds_enforced() {
        let narrow: Config = toml::from_str("[display]\nid_width = 2\n").unwrap();
        assert!(narrow.validate().is_err());

        let wide: Config = toml::from_str("[display]\nid_width = 64\n").unwrap();
        assert!(wide.validate().is_err());

        let ok: Config = toml::from_str("[display]\nid_width = 36\n").unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "interactive = false\n\n[display]\necho_tree = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.interactive, Some(false));
        assert!(!config.echo_tree());
    }

    #[test]
    fn load_from_invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not toml at all [").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
