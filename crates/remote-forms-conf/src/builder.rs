//! Merging sources into [`Settings`]

use crate::settings::Settings;
use crate::sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};
use serde_json::{Map, Value};
use std::path::Path;

/// Collects sources and merges them by priority
///
/// # Examples
///
/// ```
/// use remote_forms_conf::{DefaultSource, SettingsBuilder};
///
/// let settings = SettingsBuilder::new()
///     .add_source(DefaultSource::new())
///     .build()
///     .unwrap();
/// assert_eq!(settings.server.bind, "127.0.0.1:8000");
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	pub fn build(mut self) -> Result<Settings, SourceError> {
		// Stable sort keeps insertion order between equal priorities
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = Map::new();
		for source in &self.sources {
			let values = source.load()?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"loaded settings source"
			);
			merge(&mut merged, values);
		}

		Ok(serde_json::from_value(Value::Object(merged))?)
	}
}

/// Deep-merge `incoming` into `base`; scalars in `incoming` win
fn merge(base: &mut Map<String, Value>, incoming: Map<String, Value>) {
	for (key, value) in incoming {
		match (base.get_mut(&key), value) {
			(Some(Value::Object(existing)), Value::Object(child)) => merge(existing, child),
			(Some(existing), value) => {
				let value = coerce(existing, value);
				*existing = value;
			}
			(None, value) => {
				base.insert(key, value);
			}
		}
	}
}

/// Convert a string to the type of the value it replaces, when possible
fn coerce(existing: &Value, value: Value) -> Value {
	let Value::String(raw) = &value else {
		return value;
	};
	let trimmed = raw.trim();

	match existing {
		Value::Number(_) => {
			if let Ok(n) = trimmed.parse::<u64>() {
				return Value::from(n);
			}
			if let Ok(n) = trimmed.parse::<i64>() {
				return Value::from(n);
			}
			value
		}
		Value::Bool(_) => match trimmed.to_lowercase().as_str() {
			"true" | "1" | "yes" | "on" => Value::Bool(true),
			"false" | "0" | "no" | "off" => Value::Bool(false),
			_ => value,
		},
		_ => value,
	}
}

impl Settings {
	/// Defaults, then `path` (if given and present), then `REMOTE_FORMS_*`
	///
	/// # Errors
	///
	/// Fails when the file cannot be parsed or a value has the wrong type.
	pub fn load(path: Option<&Path>) -> Result<Self, SourceError> {
		let mut builder = SettingsBuilder::new().add_source(DefaultSource::new());
		if let Some(path) = path {
			builder = builder.add_source(TomlFileSource::new(path));
		}
		builder.add_source(EnvSource::new()).build()
	}
}
