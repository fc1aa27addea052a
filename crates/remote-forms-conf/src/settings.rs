//! Settings sections

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root settings object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub cache: CacheSettings,
	pub widgets: WidgetSettings,
	pub server: ServerSettings,
	pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
	/// Lifetime of cached choice listings
	pub choices_ttl_secs: u64,
}

impl CacheSettings {
	pub fn choices_ttl(&self) -> Duration {
		Duration::from_secs(self.choices_ttl_secs)
	}
}

impl Default for CacheSettings {
	fn default() -> Self {
		Self {
			choices_ttl_secs: 60 * 15,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
	/// Placeholder option shown before any choice is selected
	pub default_empty_label: String,
}

impl Default for WidgetSettings {
	fn default() -> Self {
		Self {
			default_empty_label: "---------".to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
	pub bind: String,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			bind: "127.0.0.1:8000".to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// `EnvFilter` directive, e.g. `info` or `remote_forms_views=debug`
	pub level: String,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
		}
	}
}
