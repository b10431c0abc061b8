use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Default maximum context order.
pub const DEFAULT_ORDER: usize = 6;

/// Default number of successors proposed per context length.
pub const DEFAULT_PREDICTION_CUTOFF: usize = 10;

/// Run parameters shared by every component of a model.
///
/// A `RunConfig` is handed to a model when it is built and never changes
/// afterwards, so every window extracted for training and every window
/// extracted for estimation agree on the same order.
///
/// # Invariants
/// - `order >= 1`
/// - `prediction_cutoff >= 1`
///
/// # Example
/// ```toml
/// order = 4
/// prediction_cutoff = 20
/// ```
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct RunConfig {
	/// Maximum context order `N` (window length, target token included).
	order: usize,

	/// Number of top successors `K` queried per context length when predicting.
	prediction_cutoff: usize,
}

impl Default for RunConfig {
	fn default() -> Self {
		Self { order: DEFAULT_ORDER, prediction_cutoff: DEFAULT_PREDICTION_CUTOFF }
	}
}

impl RunConfig {
	/// Creates a validated configuration.
	///
	/// # Errors
	/// Returns `InvalidConfig` if `order` or `prediction_cutoff` is zero.
	pub fn new(order: usize, prediction_cutoff: usize) -> Result<Self> {
		let config = Self { order, prediction_cutoff };
		config.validate()?;
		Ok(config)
	}

	/// Parses a configuration from TOML text. Missing keys keep their defaults.
	pub fn from_toml_str(text: &str) -> Result<Self> {
		let config: Self = toml::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads and parses a TOML configuration file.
	pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let text = std::fs::read_to_string(path)?;
		Self::from_toml_str(&text)
	}

	/// Returns a copy with a different order.
	pub fn with_order(self, order: usize) -> Result<Self> {
		Self::new(order, self.prediction_cutoff)
	}

	/// Returns a copy with a different prediction cutoff.
	pub fn with_prediction_cutoff(self, prediction_cutoff: usize) -> Result<Self> {
		Self::new(self.order, prediction_cutoff)
	}

	/// Maximum context order `N`.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Prediction result cutoff `K`.
	pub fn prediction_cutoff(&self) -> usize {
		self.prediction_cutoff
	}

	fn validate(&self) -> Result<()> {
		if self.order == 0 {
			return Err(ModelError::InvalidConfig("order must be >= 1".to_owned()));
		}
		if self.prediction_cutoff == 0 {
			return Err(ModelError::InvalidConfig("prediction_cutoff must be >= 1".to_owned()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_values() {
		let config = RunConfig::default();
		assert_eq!(config.order(), DEFAULT_ORDER);
		assert_eq!(config.prediction_cutoff(), DEFAULT_PREDICTION_CUTOFF);
	}

	#[test]
	fn rejects_zero_values() {
		assert!(matches!(RunConfig::new(0, 10), Err(ModelError::InvalidConfig(_))));
		assert!(matches!(RunConfig::new(3, 0), Err(ModelError::InvalidConfig(_))));
	}

	#[test]
	fn toml_partial_keeps_defaults() {
		let config = RunConfig::from_toml_str("order = 3").unwrap();
		assert_eq!(config.order(), 3);
		assert_eq!(config.prediction_cutoff(), DEFAULT_PREDICTION_CUTOFF);
	}

	#[test]
	fn toml_invalid_is_reported() {
		assert!(matches!(RunConfig::from_toml_str("order = \"x\""), Err(ModelError::Toml(_))));
		assert!(matches!(RunConfig::from_toml_str("order = 0"), Err(ModelError::InvalidConfig(_))));
	}
}
