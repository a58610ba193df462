//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `glossa-config.yaml` at the
//! process working directory. Every field has a default matching the
//! production values, so a missing file or empty document yields a
//! working engine.

use std::path::Path;

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
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `glossa-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GlossaConfig {
    /// Engine timing and command surface settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Snapshot persistence settings.
    #[serde(default)]
    pub snapshot: SnapshotConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GlossaConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Engine timing and command surface settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// The prefix that marks a chat message as a command.
    #[serde(default = "default_command_sigil")]
    pub command_sigil: String,

    /// How long an amendment stays open for voting, in seconds.
    #[serde(default = "default_voting_window_secs")]
    pub voting_window_secs: u64,

    /// Delay between reconciliation passes, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl EngineConfig {
    /// The voting window in milliseconds, clamped into the signed range
    /// the amendment timer uses.
    pub fn voting_window_ms(&self) -> i64 {
        i64::try_from(self.voting_window_secs.saturating_mul(1_000)).unwrap_or(i64::MAX)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command_sigil: default_command_sigil(),
            voting_window_secs: default_voting_window_secs(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Snapshot persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SnapshotConfig {
    /// Path of the snapshot blob file.
    #[serde(default = "default_snapshot_path")]
    pub path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_command_sigil() -> String {
    "\\".to_owned()
}

const fn default_voting_window_secs() -> u64 {
    172_800
}

const fn default_tick_interval_ms() -> u64 {
    5_000
}

fn default_snapshot_path() -> String {
    "languages.glossa".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_production_defaults() {
        let config = GlossaConfig::parse("{}").unwrap();
        assert_eq!(config.engine.command_sigil, "\\");
        assert_eq!(config.engine.voting_window_secs, 172_800);
        assert_eq!(config.engine.tick_interval_ms, 5_000);
        assert_eq!(config.snapshot.path, "languages.glossa");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let config = GlossaConfig::parse(
            "engine:\n  voting_window_secs: 60\nsnapshot:\n  path: /tmp/test.glossa\n",
        )
        .unwrap();
        assert_eq!(config.engine.voting_window_secs, 60);
        assert_eq!(config.engine.command_sigil, "\\");
        assert_eq!(config.snapshot.path, "/tmp/test.glossa");
    }

    #[test]
    fn voting_window_ms_clamps_into_signed_range() {
        let mut config = EngineConfig::default();
        assert_eq!(config.voting_window_ms(), 172_800_000);
        config.voting_window_secs = u64::MAX;
        assert_eq!(config.voting_window_ms(), i64::MAX);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(GlossaConfig::parse("engine: [not a map").is_err());
    }
}
