//! Character field for text input

use crate::field::{FieldError, FieldResult, FormField, is_empty_value};
use crate::widgets::Widget;
use serde_json::Value;

/// Character field with an optional length limit
#[derive(Debug, Clone)]
pub struct CharField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub disabled: bool,
	pub widget: Widget,
	pub initial: Option<Value>,
	pub max_length: Option<usize>,
	pub strip: bool,
}

impl CharField {
	/// Create an optional text field
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_forms::{CharField, FormField};
	/// use serde_json::json;
	///
	/// let field = CharField::new("nickname").with_max_length(5);
	/// assert_eq!(field.clean(Some(&json!("  ada "))).unwrap(), json!("ada"));
	/// assert!(field.clean(Some(&json!("lovelace"))).is_err());
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			required: false,
			disabled: false,
			widget: Widget::TextInput,
			initial: None,
			max_length: None,
			strip: true,
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn disabled(mut self) -> Self {
		self.disabled = true;
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
		self.initial = Some(Value::String(initial.into()));
		self
	}

	pub fn with_widget(mut self, widget: Widget) -> Self {
		self.widget = widget;
		self
	}
}

impl FormField for CharField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn disabled(&self) -> bool {
		self.disabled
	}

	fn widget(&self) -> &Widget {
		&self.widget
	}

	fn initial(&self) -> Option<&Value> {
		self.initial.as_ref()
	}

	fn clean(&self, value: Option<&Value>) -> FieldResult<Value> {
		if is_empty_value(value) {
			if self.required {
				return Err(FieldError::Required("This field is required.".to_string()));
			}
			return Ok(Value::String(String::new()));
		}

		let raw = match value {
			Some(Value::String(s)) => s.as_str(),
			_ => return Err(FieldError::Validation("Enter a valid value.".to_string())),
		};
		let text = if self.strip { raw.trim() } else { raw };

		if text.is_empty() && self.required {
			return Err(FieldError::Required("This field is required.".to_string()));
		}

		if let Some(max) = self.max_length {
			let len = text.chars().count();
			if len > max {
				return Err(FieldError::Validation(format!(
					"Ensure this value has at most {} characters (it has {}).",
					max, len
				)));
			}
		}

		Ok(Value::String(text.to_string()))
	}
}
