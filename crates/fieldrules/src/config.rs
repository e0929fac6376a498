//! Engine configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an unexpected key.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A setting is out of range.
	#[error("invalid value for {key}: {reason}")]
	InvalidValue { key: &'static str, reason: String },
}

/// Tuning knobs for an [`Engine`](crate::Engine).
///
/// ```toml
/// max_depth = 16
/// validate_nested = false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
	/// Deepest nested record the walks will enter. The top-level record is
	/// depth 0.
	pub max_depth: usize,
	/// Whether validation descends into nested records. Transformation
	/// always does.
	pub validate_nested: bool,
}

/// Returns the default nesting limit.
const fn default_max_depth() -> usize {
	32
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			max_depth: default_max_depth(),
			validate_nested: true,
		}
	}
}

impl EngineConfig {
	/// Parses and checks a TOML document. Missing keys take their defaults.
	pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.check()?;
		Ok(config)
	}

	/// Reads and parses a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml(&input)
	}

	pub fn check(&self) -> Result<(), ConfigError> {
		if self.max_depth == 0 {
			return Err(ConfigError::InvalidValue {
				key: "max_depth",
				reason: "must be at least 1".into(),
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
