use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{invalid_config, Result};
use crate::io::read_text_file;

/// Model parameters fixed at construction time.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
	/// Number of characters in a window. Must be positive.
	pub window_length: usize,
	/// Seed of the random source. `None` seeds from the operating system.
	pub seed: Option<u64>,
}

impl ModelConfig {
	pub fn validate(&self) -> Result<()> {
		if self.window_length == 0 {
			return Err(invalid_config("window_length must be a positive integer"));
		}
		Ok(())
	}
}

/// Parameters of a single generation run.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
	/// Text to start from. Its last `window_length` characters seed the window.
	pub initial_text: String,
	/// Number of characters to append to `initial_text`.
	pub target_length: usize,
}

/// Complete configuration of a train-then-generate run.
///
/// Every section is optional in the TOML file; missing values take their
/// defaults and are expected to be filled by the caller (ex. from the command
/// line) before `validate` is called.
///
/// ```toml
/// corpus = "data/shakespeare.txt"
///
/// [model]
/// window_length = 7
/// seed = 20
///
/// [generation]
/// initial_text = "ROMEO"
/// target_length = 500
/// ```
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Path of the training corpus.
	pub corpus: Option<PathBuf>,
	pub model: ModelConfig,
	pub generation: GenerationConfig,
}

impl Config {
	/// Parses a configuration from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self> {
		Ok(toml::from_str(text)?)
	}

	/// Loads a configuration from a TOML file.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		Self::from_toml_str(&read_text_file(path)?)
	}

	/// Checks the configuration before any training or generation begins.
	///
	/// # Errors
	/// Returns `Error::InvalidConfig` if the window length is zero or no corpus is set.
	pub fn validate(&self) -> Result<()> {
		self.model.validate()?;
		if self.corpus.is_none() {
			return Err(invalid_config("no corpus file given"));
		}
		Ok(())
	}
}
