//! Pieces shared by the remote select variants

use super::WidgetError;
use remote_forms_urls::{LazyUrl, UrlReverser};
use std::collections::BTreeMap;

/// Placeholder option text used when none is configured
pub const DEFAULT_EMPTY_LABEL: &str = "---------";

/// Where the options come from and what to show before one is picked
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RemoteSource {
	pub(crate) url: LazyUrl,
	pub(crate) empty_label: String,
}

impl RemoteSource {
	/// A literal `url` wins over `url_name`; blank values count as missing
	pub(crate) fn new(
		url: Option<String>,
		url_name: Option<String>,
		empty_label: Option<String>,
	) -> Result<Self, WidgetError> {
		let url = match (
			url.filter(|u| !u.is_empty()),
			url_name.filter(|n| !n.is_empty()),
		) {
			(Some(url), _) => LazyUrl::literal(url),
			(None, Some(name)) => LazyUrl::named(name),
			(None, None) => {
				return Err(WidgetError::ImproperlyConfigured(
					"Either 'url_name' or 'url' must be provided.".to_string(),
				));
			}
		};

		Ok(Self {
			url,
			empty_label: empty_label.unwrap_or_default(),
		})
	}

	/// Merge the source's data attributes over `user_attrs`
	pub(crate) fn attrs(
		&self,
		user_attrs: &BTreeMap<String, String>,
		class_marker: &str,
		reverser: &UrlReverser,
	) -> Result<BTreeMap<String, String>, WidgetError> {
		let mut attrs = user_attrs.clone();
		attrs.insert("data-url".to_string(), self.url.resolve(reverser)?.to_string());
		attrs.insert("data-empty-label".to_string(), self.empty_label.clone());

		let class = match user_attrs.get("class").map(|c| c.trim()) {
			Some(existing) if !existing.is_empty() => format!("{} {}", existing, class_marker),
			_ => class_marker.to_string(),
		};
		attrs.insert("class".to_string(), class);

		Ok(attrs)
	}
}

/// Builder state for the empty label: unset, explicitly `None`, or a text
#[derive(Debug, Clone, Default)]
pub(crate) enum EmptyLabel {
	#[default]
	Unset,
	Set(Option<String>),
}

impl EmptyLabel {
	pub(crate) fn resolve(self, default: &str) -> Option<String> {
		match self {
			EmptyLabel::Unset => Some(default.to_string()),
			EmptyLabel::Set(label) => label,
		}
	}
}
