use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by model construction, training and the I/O helpers.
///
/// Generation itself never fails: an unknown window or a short initial
/// text are normal stop conditions (see `StopReason`).
#[derive(Error, Debug)]
pub enum Error {
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("corpus too short: window length is {window_length} but only {found} characters were read")]
	InsufficientCorpus { window_length: usize, found: usize },

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("corpus is not valid UTF-8: {0}")]
	InvalidUtf8(#[from] std::string::FromUtf8Error),

	#[error("config file error: {0}")]
	ConfigParse(#[from] toml::de::Error),
}

pub(crate) fn invalid_config<S: Into<String>>(msg: S) -> Error {
	Error::InvalidConfig(msg.into())
}
