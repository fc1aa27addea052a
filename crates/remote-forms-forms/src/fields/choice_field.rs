//! Choice field over a fixed list of options

use crate::field::{FieldError, FieldResult, FormField, is_empty_value, value_as_text};
use crate::widgets::Widget;
use serde_json::Value;

/// A field whose value must be one of a fixed set of `(value, label)` pairs
///
/// # Examples
///
/// ```
/// use remote_forms_forms::{ChoiceField, FormField};
/// use serde_json::json;
///
/// let field = ChoiceField::new("state", vec![("BA".into(), "Bahia".into()), ("CE".into(), "Ceará".into())]);
/// assert_eq!(field.clean(Some(&json!("BA"))).unwrap(), json!("BA"));
/// assert!(field.clean(Some(&json!("SP"))).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ChoiceField {
	pub name: String,
	pub required: bool,
	pub disabled: bool,
	pub choices: Vec<(String, String)>,
	pub widget: Widget,
	pub initial: Option<Value>,
}

impl ChoiceField {
	pub fn new(name: impl Into<String>, choices: Vec<(String, String)>) -> Self {
		Self {
			name: name.into(),
			required: true,
			disabled: false,
			widget: Widget::Select {
				choices: choices.clone(),
			},
			choices,
			initial: None,
		}
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	pub fn disabled(mut self, disabled: bool) -> Self {
		self.disabled = disabled;
		self
	}

	pub fn with_initial(mut self, value: Value) -> Self {
		self.initial = Some(value);
		self
	}

	pub fn with_widget(mut self, widget: Widget) -> Self {
		self.widget = widget;
		self
	}
}

impl FormField for ChoiceField {
	fn name(&self) -> &str {
		&self.name
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

		let text = value.and_then(value_as_text).unwrap_or_default();
		if self.choices.iter().any(|(choice, _)| *choice == text) {
			Ok(Value::String(text))
		} else {
			Err(FieldError::InvalidChoice(format!(
				"Select a valid choice. {} is not one of the available choices.",
				text
			)))
		}
	}
}
