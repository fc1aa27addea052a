//! Configuration sources

use crate::settings::Settings;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// Something that yields a (possibly nested) key/value tree of settings
pub trait ConfigSource: Send + Sync {
	fn load(&self) -> Result<Map<String, Value>, SourceError>;

	/// Higher priority wins when two sources set the same key
	fn priority(&self) -> u8;

	fn description(&self) -> String;
}

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid source: {0}")]
	InvalidSource(String),
}

impl From<SourceError> for remote_forms_core::Error {
	fn from(err: SourceError) -> Self {
		remote_forms_core::Error::ImproperlyConfigured(err.to_string())
	}
}

/// Built-in defaults, lowest priority
pub struct DefaultSource {
	values: Map<String, Value>,
}

impl DefaultSource {
	pub fn new() -> Self {
		let values = match serde_json::to_value(Settings::default()) {
			Ok(Value::Object(map)) => map,
			_ => Map::new(),
		};
		Self { values }
	}
}

impl Default for DefaultSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<Map<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

/// A TOML file; a missing file contributes nothing
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<Map<String, Value>, SourceError> {
		if !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "settings file not found, skipping");
			return Ok(Map::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;

		match serde_json::to_value(toml_value)? {
			Value::Object(map) => Ok(map),
			_ => Err(SourceError::Parse("Expected table at root".to_string())),
		}
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variables under a prefix, highest priority
///
/// The prefix is stripped, the rest lowercased, and `__` separates nesting
/// levels: `REMOTE_FORMS_CACHE__CHOICES_TTL_SECS=60` sets
/// `cache.choices_ttl_secs`. Values are loaded as strings and coerced to the
/// type of the value they override when settings are built.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	pub const DEFAULT_PREFIX: &'static str = "REMOTE_FORMS_";

	pub fn new() -> Self {
		Self::with_prefix(Self::DEFAULT_PREFIX)
	}

	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	fn insert_path(config: &mut Map<String, Value>, path: &[&str], value: String) {
		match path {
			[] => {}
			[leaf] => {
				config.insert(leaf.to_string(), Value::String(value));
			}
			[head, rest @ ..] => {
				let entry = config
					.entry(head.to_string())
					.or_insert_with(|| Value::Object(Map::new()));
				if !entry.is_object() {
					*entry = Value::Object(Map::new());
				}
				if let Value::Object(child) = entry {
					Self::insert_path(child, rest, value);
				}
			}
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<Map<String, Value>, SourceError> {
		let mut config = Map::new();

		for (key, value) in std::env::vars() {
			let Some(stripped) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let lower = stripped.to_lowercase();
			let path: Vec<&str> = lower.split("__").collect();
			if path.iter().any(|part| part.is_empty()) {
				return Err(SourceError::InvalidSource(format!(
					"malformed settings variable: {}",
					key
				)));
			}
			Self::insert_path(&mut config, &path, value);
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}
