//! Error types for the n-gram modeling crate.

use thiserror::Error;

/// Errors raised while configuring, training or querying a model.
#[derive(Debug, Error)]
pub enum ModelError {
	/// A token position outside of the input stream.
	#[error("Index {index} out of bounds for a stream of {len} tokens")]
	IndexOutOfBounds {
		index: usize,
		len: usize,
	},

	/// No smoothing strategy is registered under this name.
	#[error("Unknown smoothing strategy: {0}")]
	UnknownSmoother(String),

	/// Invalid run configuration.
	#[error("Configuration error: {0}")]
	InvalidConfig(String),

	/// A corpus line holds something that is not a token id.
	#[error("Invalid token {token:?} on line {line}")]
	Parse {
		line: usize,
		token: String,
	},

	/// IO error
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// TOML configuration could not be decoded.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
