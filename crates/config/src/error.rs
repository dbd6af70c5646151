//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The file is not valid TOML or does not match the schema.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// The API base URL could not be parsed.
	#[error("invalid API base URL {value:?}: {error}")]
	InvalidUrl {
		/// The rejected value.
		value: String,
		/// The underlying parse error.
		error: url::ParseError,
	},

	/// A setting is out of range.
	#[error("invalid value for {key}: {reason}")]
	InvalidValue {
		/// Dotted setting name.
		key: &'static str,
		/// Why it was rejected.
		reason: String,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
