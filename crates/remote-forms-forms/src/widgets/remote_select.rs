//! Select whose options are fetched from a URL

use super::WidgetError;
use super::remote::{DEFAULT_EMPTY_LABEL, EmptyLabel, RemoteSource};
use remote_forms_conf::WidgetSettings;
use remote_forms_urls::{LazyUrl, UrlReverser};
use std::collections::BTreeMap;

const CLASS_MARKER: &str = "remote-in-django-form";

/// A select input that loads its options from a remote URL
///
/// # Examples
///
/// ```
/// use remote_forms_forms::RemoteSelectWidget;
/// use remote_forms_urls::UrlReverser;
///
/// let widget = RemoteSelectWidget::builder()
///     .url_name("choices:categories")
///     .empty_label(Some("Select a category"))
///     .build()
///     .unwrap();
///
/// let mut reverser = UrlReverser::new();
/// reverser.register_path("choices:categories", "/choices/categories/");
///
/// let attrs = widget.attrs(&reverser).unwrap();
/// assert_eq!(attrs["data-url"], "/choices/categories/");
/// assert_eq!(attrs["data-empty-label"], "Select a category");
/// assert_eq!(attrs["class"], "remote-in-django-form");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSelectWidget {
	source: RemoteSource,
	attrs: BTreeMap<String, String>,
}

impl RemoteSelectWidget {
	pub fn builder() -> RemoteSelectWidgetBuilder {
		RemoteSelectWidgetBuilder::default()
	}

	pub fn url(&self) -> &LazyUrl {
		&self.source.url
	}

	pub fn empty_label(&self) -> &str {
		&self.source.empty_label
	}

	/// Rendering attributes: user attributes plus `data-url`,
	/// `data-empty-label` and the `remote-in-django-form` class marker
	///
	/// # Errors
	///
	/// Returns [`WidgetError::Url`] when a route name cannot be reversed.
	pub fn attrs(&self, reverser: &UrlReverser) -> Result<BTreeMap<String, String>, WidgetError> {
		self.source.attrs(&self.attrs, CLASS_MARKER, reverser)
	}
}

#[derive(Debug, Clone, Default)]
pub struct RemoteSelectWidgetBuilder {
	url: Option<String>,
	url_name: Option<String>,
	empty_label: EmptyLabel,
	default_empty_label: Option<String>,
	attrs: BTreeMap<String, String>,
}

impl RemoteSelectWidgetBuilder {
	pub fn url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());
		self
	}

	pub fn url_name(mut self, url_name: impl Into<String>) -> Self {
		self.url_name = Some(url_name.into());
		self
	}

	/// `None` renders an empty placeholder
	pub fn empty_label<S: Into<String>>(mut self, label: Option<S>) -> Self {
		self.empty_label = EmptyLabel::Set(label.map(Into::into));
		self
	}

	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.insert(name.into(), value.into());
		self
	}

	/// Take the default empty label from settings
	pub fn with_settings(mut self, settings: &WidgetSettings) -> Self {
		self.default_empty_label = Some(settings.default_empty_label.clone());
		self
	}

	/// # Errors
	///
	/// Fails with [`WidgetError::ImproperlyConfigured`] when neither `url`
	/// nor `url_name` was given.
	pub fn build(self) -> Result<RemoteSelectWidget, WidgetError> {
		let default = self
			.default_empty_label
			.as_deref()
			.unwrap_or(DEFAULT_EMPTY_LABEL);
		let empty_label = self.empty_label.resolve(default);

		Ok(RemoteSelectWidget {
			source: RemoteSource::new(self.url, self.url_name, empty_label)?,
			attrs: self.attrs,
		})
	}
}
