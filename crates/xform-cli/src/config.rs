//! TOML configuration for the `xform` binary.

use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Most decimals that still say something about an `f64`.
pub const MAX_PRECISION: usize = 17;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`Config`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Precision outside `0..=MAX_PRECISION`.
    #[error("precision {0} is out of range (max {MAX_PRECISION})")]
    Precision(usize),
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The wire payload as JSON.
    #[default]
    Json,
    /// Human-readable vectors and matrix.
    Text,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How `apply` prints its result.
    pub output: OutputConfig,
    /// Extra diagnostics around engine calls.
    pub engine: EngineConfig,
}

/// `[output]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JSON payload or human-readable text.
    pub format: OutputFormat,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Decimals shown in text output.
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
            precision: 3,
        }
    }
}

/// `[engine]` table. These only affect what the front end reports.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Log a warning for zero or negative scale factors, and for a
    /// composite transform with no inverse.
    pub warn_degenerate_scale: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            warn_degenerate_scale: true,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Reject values the renderer cannot honour.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.output.precision > MAX_PRECISION {
            return Err(ConfigError::Precision(self.output.precision));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output.precision, 3);
        assert!(config.output.pretty);
        assert!(config.engine.warn_degenerate_scale);
    }

    #[test]
    fn partial_tables() {
        let config = Config::from_toml(
            r#"
            [output]
            format = "text"
            precision = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.precision, 6);
        assert!(config.output.pretty);
        assert!(config.engine.warn_degenerate_scale);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("[output]\ncolour = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn precision_is_bounded() {
        let err = Config::from_toml("[output]\nprecision = 40\n").unwrap_err();
        assert!(matches!(err, ConfigError::Precision(40)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load(Path::new("/nonexistent/xform.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/xform.toml"));
    }
}
