//! Select whose options depend on a parent field

use super::WidgetError;
use super::remote::{DEFAULT_EMPTY_LABEL, EmptyLabel, RemoteSource};
use remote_forms_conf::WidgetSettings;
use remote_forms_urls::{LazyUrl, UrlReverser};
use std::collections::BTreeMap;

const CLASS_MARKER: &str = "remote-chained-in-django-form";

/// A remote select reloaded whenever its parent field changes
///
/// The parent's value is sent to the options URL as the query parameter
/// named by `url_param_field`.
///
/// # Examples
///
/// ```
/// use remote_forms_forms::RemoteChainedSelectWidget;
/// use remote_forms_urls::UrlReverser;
///
/// let widget = RemoteChainedSelectWidget::builder("state")
///     .url("/choices/cities/")
///     .url_param_field("state")
///     .build()
///     .unwrap();
///
/// let attrs = widget.attrs(&UrlReverser::new()).unwrap();
/// assert_eq!(attrs["data-parent-name"], "state");
/// assert_eq!(attrs["data-url-param-field"], "state");
/// assert_eq!(attrs["class"], "remote-chained-in-django-form");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteChainedSelectWidget {
	source: RemoteSource,
	parent_name: String,
	url_param_field: Option<String>,
	attrs: BTreeMap<String, String>,
}

impl RemoteChainedSelectWidget {
	pub fn builder(parent_name: impl Into<String>) -> RemoteChainedSelectWidgetBuilder {
		RemoteChainedSelectWidgetBuilder {
			parent_name: parent_name.into(),
			url: None,
			url_name: None,
			url_param_field: None,
			empty_label: EmptyLabel::Unset,
			default_empty_label: None,
			attrs: BTreeMap::new(),
		}
	}

	pub fn url(&self) -> &LazyUrl {
		&self.source.url
	}

	pub fn parent_name(&self) -> &str {
		&self.parent_name
	}

	pub fn url_param_field(&self) -> Option<&str> {
		self.url_param_field.as_deref()
	}

	pub fn empty_label(&self) -> &str {
		&self.source.empty_label
	}

	pub fn attrs(&self, reverser: &UrlReverser) -> Result<BTreeMap<String, String>, WidgetError> {
		let mut attrs = self.source.attrs(&self.attrs, CLASS_MARKER, reverser)?;
		attrs.insert("data-parent-name".to_string(), self.parent_name.clone());
		attrs.insert(
			"data-url-param-field".to_string(),
			self.url_param_field.clone().unwrap_or_default(),
		);
		Ok(attrs)
	}
}

#[derive(Debug, Clone)]
pub struct RemoteChainedSelectWidgetBuilder {
	parent_name: String,
	url: Option<String>,
	url_name: Option<String>,
	url_param_field: Option<String>,
	empty_label: EmptyLabel,
	default_empty_label: Option<String>,
	attrs: BTreeMap<String, String>,
}

impl RemoteChainedSelectWidgetBuilder {
	pub fn url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());
		self
	}

	pub fn url_name(mut self, url_name: impl Into<String>) -> Self {
		self.url_name = Some(url_name.into());
		self
	}

	pub fn url_param_field(mut self, field: impl Into<String>) -> Self {
		self.url_param_field = Some(field.into());
		self
	}

	pub fn empty_label<S: Into<String>>(mut self, label: Option<S>) -> Self {
		self.empty_label = EmptyLabel::Set(label.map(Into::into));
		self
	}

	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.insert(name.into(), value.into());
		self
	}

	pub fn with_settings(mut self, settings: &WidgetSettings) -> Self {
		self.default_empty_label = Some(settings.default_empty_label.clone());
		self
	}

	pub fn build(self) -> Result<RemoteChainedSelectWidget, WidgetError> {
		let default = self
			.default_empty_label
			.as_deref()
			.unwrap_or(DEFAULT_EMPTY_LABEL);
		let empty_label = self.empty_label.resolve(default);

		Ok(RemoteChainedSelectWidget {
			source: RemoteSource::new(self.url, self.url_name, empty_label)?,
			parent_name: self.parent_name,
			url_param_field: self.url_param_field.filter(|f| !f.is_empty()),
			attrs: self.attrs,
		})
	}
}
