//! Process-wide tracing subscriber

use remote_forms_conf::LoggingSettings;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
	#[error("Invalid log filter '{directive}': {message}")]
	InvalidFilter { directive: String, message: String },
	#[error("A global subscriber is already installed")]
	AlreadyInstalled,
}

/// Filter built from `RUST_LOG` when set, otherwise from `settings.level`
pub fn env_filter(settings: &LoggingSettings) -> Result<EnvFilter, LoggingError> {
	if let Ok(filter) = EnvFilter::try_from_default_env() {
		return Ok(filter);
	}
	EnvFilter::try_new(&settings.level).map_err(|e| LoggingError::InvalidFilter {
		directive: settings.level.clone(),
		message: e.to_string(),
	})
}

/// Install the global fmt subscriber
///
/// Fails if a subscriber was already installed, e.g. by a test harness.
pub fn init(settings: &LoggingSettings) -> Result<(), LoggingError> {
	let filter = env_filter(settings)?;
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.try_init()
		.map_err(|_| LoggingError::AlreadyInstalled)
}
