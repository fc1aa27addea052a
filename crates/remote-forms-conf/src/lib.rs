//! Settings for remote-forms
//!
//! [`Settings`] is assembled from layered [`ConfigSource`]s. Sources with a
//! higher priority override lower ones key by key, so a TOML file can set
//! `[cache]` while a single environment variable overrides one of its fields.
//!
//! ```
//! use remote_forms_conf::Settings;
//!
//! let settings = Settings::default();
//! assert_eq!(settings.cache.choices_ttl_secs, 900);
//! assert_eq!(settings.widgets.default_empty_label, "---------");
//! ```

pub mod builder;
pub mod settings;
pub mod sources;

pub use builder::SettingsBuilder;
pub use settings::{CacheSettings, LoggingSettings, ServerSettings, Settings, WidgetSettings};
pub use sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};
