//! # remote-forms
//!
//! Helpers for forms whose choice fields are validated against a remote
//! endpoint and rendered by selects that load their options over HTTP.
//!
//! ## Feature Flags
//!
//! - `forms` - API-validated field binder, disabled-field error filter and
//!   remote select widgets
//! - `views` - cached `(value, label)` choice endpoint
//! - `cache` - the `Cache` trait and its in-memory backend
//! - `orm` - model metadata, managers and querysets
//! - `conf` - layered settings (defaults, TOML, environment)
//! - `server` - hyper HTTP/1 server and tracing setup
//! - `full` (default) - all of the above
//!
//! ## Quick Example
//!
//! ```
//! use remote_forms::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let cities = Arc::new(InMemoryManager::new(ModelMeta::new("City", "id", ["id", "name", "state"])));
//!
//! let choices = ModelChoicesView::new(cities.clone(), InMemoryCache::new())
//!     .with_allowed_filters(AllowedFilters::Only(vec!["state".into()]));
//! let router = UrlRouter::new().route_named("city-choices", "/choices/cities/", Arc::new(choices));
//!
//! let widget = RemoteChainedSelectWidget::builder("state")
//!     .url_name("city-choices")
//!     .url_param_field("state")
//!     .build()?;
//! let attrs = Widget::from(widget).attrs(router.reverser())?;
//! assert_eq!(attrs["data-url"], "/choices/cities/");
//! assert_eq!(attrs["data-url-param-field"], "state");
//! # Ok(())
//! # }
//! ```

pub mod http {
	pub use remote_forms_http::{Handler, Request, RequestBuilder, Response};
}

pub mod urls {
	pub use remote_forms_urls::{LazyUrl, UrlReverser, UrlRouter};
}

#[cfg(feature = "orm")]
pub mod orm {
	pub use remote_forms_orm::*;
}

#[cfg(feature = "cache")]
pub mod cache {
	pub use remote_forms_cache::*;
}

#[cfg(feature = "conf")]
pub mod conf {
	pub use remote_forms_conf::*;
}

#[cfg(feature = "forms")]
pub mod forms {
	pub use remote_forms_forms::*;
}

#[cfg(feature = "views")]
pub mod views {
	pub use remote_forms_views::*;
}

#[cfg(feature = "server")]
pub mod server {
	pub use remote_forms_server::*;
}

pub use remote_forms_core::exception::{Error, Result};

pub mod prelude {
	pub use crate::http::{Handler, Request, Response};
	pub use crate::urls::{UrlReverser, UrlRouter};
	pub use crate::{Error, Result};

	#[cfg(feature = "cache")]
	pub use crate::cache::{Cache, InMemoryCache};

	#[cfg(feature = "conf")]
	pub use crate::conf::Settings;

	#[cfg(feature = "forms")]
	pub use crate::forms::{
		ApiFieldsHandler, ClearDisabledFieldErrors, Form, FormField, FormPipeline, FormStep,
		ModelChoiceField, RemoteChainedSelectWidget, RemoteSelectWidget, Widget,
	};

	#[cfg(feature = "orm")]
	pub use crate::orm::{InMemoryManager, Manager, ModelMeta, QuerySet};

	#[cfg(feature = "server")]
	pub use crate::server::HttpServer;

	#[cfg(feature = "views")]
	pub use crate::views::{AllowedFilters, ModelChoicesView, View};
}
