//! URLs resolved on first use

use crate::reverse::UrlReverser;
use once_cell::sync::OnceCell;
use remote_forms_core::exception::Result;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
	Literal(String),
	Named(String),
}

/// A literal URL, or a route name reversed the first time it is needed
///
/// Reversal happens at most once; later calls return the memoized path even
/// if the reverser passed in changes.
///
/// # Examples
///
/// ```
/// use remote_forms_urls::{LazyUrl, UrlReverser};
///
/// let url = LazyUrl::named("choices:cities");
/// assert!(!url.is_resolved());
///
/// let mut reverser = UrlReverser::new();
/// reverser.register_path("choices:cities", "/choices/cities/");
///
/// assert_eq!(url.resolve(&reverser).unwrap(), "/choices/cities/");
/// assert!(url.is_resolved());
/// ```
#[derive(Clone)]
pub struct LazyUrl {
	target: Target,
	resolved: OnceCell<String>,
}

impl LazyUrl {
	pub fn literal(url: impl Into<String>) -> Self {
		let url = url.into();
		Self {
			resolved: OnceCell::with_value(url.clone()),
			target: Target::Literal(url),
		}
	}

	pub fn named(name: impl Into<String>) -> Self {
		Self {
			target: Target::Named(name.into()),
			resolved: OnceCell::new(),
		}
	}

	/// The route name, for URLs built with [`LazyUrl::named`]
	pub fn name(&self) -> Option<&str> {
		match &self.target {
			Target::Named(name) => Some(name),
			Target::Literal(_) => None,
		}
	}

	pub fn is_resolved(&self) -> bool {
		self.resolved.get().is_some()
	}

	pub fn resolve(&self, reverser: &UrlReverser) -> Result<&str> {
		let url = self.resolved.get_or_try_init(|| -> Result<String> {
			match &self.target {
				Target::Literal(url) => Ok(url.clone()),
				Target::Named(name) => {
					let path = reverser.reverse(name)?;
					tracing::debug!(route = %name, %path, "resolved lazy url");
					Ok(path)
				}
			}
		})?;
		Ok(url.as_str())
	}
}

impl fmt::Debug for LazyUrl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LazyUrl")
			.field("target", &self.target)
			.field("resolved", &self.resolved.get())
			.finish()
	}
}

impl PartialEq for LazyUrl {
	fn eq(&self, other: &Self) -> bool {
		self.target == other.target
	}
}
