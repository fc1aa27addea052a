//! Route name to path resolution

use remote_forms_core::exception::{Error, Result};
use std::collections::HashMap;

/// Name → path registry
///
/// # Examples
///
/// ```
/// use remote_forms_urls::UrlReverser;
///
/// let mut reverser = UrlReverser::new();
/// reverser.register_path("choices:cities", "/choices/cities/");
///
/// assert_eq!(reverser.reverse("choices:cities").unwrap(), "/choices/cities/");
/// assert!(reverser.reverse("choices:states").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrlReverser {
	routes: HashMap<String, String>,
}

impl UrlReverser {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register (or replace) the path of a route name
	pub fn register_path(&mut self, name: &str, path: &str) {
		self.routes.insert(name.to_string(), path.to_string());
	}

	/// Reverse a route name into its path
	///
	/// Fails with [`Error::NotFound`] for an unknown name.
	pub fn reverse(&self, name: &str) -> Result<String> {
		self.routes
			.get(name)
			.cloned()
			.ok_or_else(|| Error::NotFound(format!("Reverse for '{}' not found", name)))
	}
}
