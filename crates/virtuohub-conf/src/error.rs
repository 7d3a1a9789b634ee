use std::path::PathBuf;

use thiserror::Error;

/// Result type for settings operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The settings file could not be read
	#[error("failed to read settings file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The settings file is not valid TOML for [`crate::GateSettings`]
	#[error("invalid settings TOML: {0}")]
	Toml(#[from] toml::de::Error),

	/// An environment variable held an unparsable value
	#[error("cannot parse environment variable {key} (value length {value_len})")]
	EnvParse { key: String, value_len: usize },

	/// A setting failed validation
	#[error("invalid setting {key}: {reason}")]
	Invalid { key: &'static str, reason: String },
}
