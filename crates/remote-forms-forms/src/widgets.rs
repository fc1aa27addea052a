//! Widgets and the remote select configuration

mod remote;
mod remote_chained_select;
mod remote_select;

pub use remote::DEFAULT_EMPTY_LABEL;
pub use remote_chained_select::{RemoteChainedSelectWidget, RemoteChainedSelectWidgetBuilder};
pub use remote_select::{RemoteSelectWidget, RemoteSelectWidgetBuilder};

use remote_forms_urls::UrlReverser;
use std::collections::BTreeMap;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
	#[error("{0}")]
	ImproperlyConfigured(String),

	/// The configured route name could not be reversed
	#[error("URL resolution failed: {0}")]
	Url(#[from] remote_forms_core::Error),
}

impl From<WidgetError> for remote_forms_core::Error {
	fn from(err: WidgetError) -> Self {
		match err {
			WidgetError::ImproperlyConfigured(msg) => {
				remote_forms_core::Error::ImproperlyConfigured(msg)
			}
			WidgetError::Url(inner) => inner,
		}
	}
}

/// How a field is rendered
#[derive(Debug, Clone, Default)]
pub enum Widget {
	#[default]
	TextInput,
	Select {
		choices: Vec<(String, String)>,
	},
	RemoteSelect(RemoteSelectWidget),
	RemoteChainedSelect(RemoteChainedSelectWidget),
}

impl Widget {
	/// Whether options are loaded from a URL at render time
	pub fn is_remote(&self) -> bool {
		matches!(
			self,
			Widget::RemoteSelect(_) | Widget::RemoteChainedSelect(_)
		)
	}

	/// HTML attributes the widget contributes; empty for local widgets
	pub fn attrs(&self, reverser: &UrlReverser) -> Result<BTreeMap<String, String>, WidgetError> {
		match self {
			Widget::TextInput | Widget::Select { .. } => Ok(BTreeMap::new()),
			Widget::RemoteSelect(widget) => widget.attrs(reverser),
			Widget::RemoteChainedSelect(widget) => widget.attrs(reverser),
		}
	}
}

impl From<RemoteSelectWidget> for Widget {
	fn from(widget: RemoteSelectWidget) -> Self {
		Widget::RemoteSelect(widget)
	}
}

impl From<RemoteChainedSelectWidget> for Widget {
	fn from(widget: RemoteChainedSelectWidget) -> Self {
		Widget::RemoteChainedSelect(widget)
	}
}
