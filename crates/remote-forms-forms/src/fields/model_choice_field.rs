//! ModelChoiceField for queryset-backed choices

use crate::field::{FieldError, FieldResult, FormField, QuerysetField, is_empty_value, value_as_text};
use crate::widgets::Widget;
use remote_forms_orm::QuerySet;
use serde_json::Value;
use std::collections::HashMap;

/// A field for selecting a single row of a queryset
///
/// The queryset is only evaluated by [`clean`](FormField::clean), which
/// looks the submitted primary key up inside it. A successful clean yields
/// the matching row as a JSON object.
pub struct ModelChoiceField {
	pub name: String,
	pub required: bool,
	pub disabled: bool,
	pub error_messages: HashMap<String, String>,
	pub widget: Widget,
	pub initial: Option<Value>,
	pub queryset: QuerySet,
}

impl ModelChoiceField {
	/// Create a required field over `queryset`
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_forms::{FormField, ModelChoiceField};
	/// use remote_forms_orm::{InMemoryManager, ModelMeta, QuerySet};
	/// use serde_json::json;
	/// use std::sync::Arc;
	///
	/// let manager = InMemoryManager::new(ModelMeta::new("Category", "id", ["id", "name"]))
	///     .with_json(json!([{"id": 1, "name": "Books"}, {"id": 2, "name": "Games"}]))
	///     .unwrap();
	///
	/// let field = ModelChoiceField::new("category", QuerySet::new(Arc::new(manager)));
	/// assert!(FormField::required(&field));
	///
	/// let cleaned = field.clean(Some(&json!("2"))).unwrap();
	/// assert_eq!(cleaned["name"], json!("Games"));
	///
	/// let err = field.clean(Some(&json!("3"))).unwrap_err();
	/// assert_eq!(err.to_string(), "Select a valid choice.");
	/// ```
	pub fn new(name: impl Into<String>, queryset: QuerySet) -> Self {
		let mut error_messages = HashMap::new();
		error_messages.insert(
			"required".to_string(),
			"This field is required.".to_string(),
		);
		error_messages.insert(
			"invalid_choice".to_string(),
			"Select a valid choice.".to_string(),
		);

		Self {
			name: name.into(),
			required: true,
			disabled: false,
			error_messages,
			widget: Widget::Select {
				choices: Vec::new(),
			},
			initial: None,
			queryset,
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

	pub fn initial(mut self, value: Value) -> Self {
		self.initial = Some(value);
		self
	}

	pub fn with_widget(mut self, widget: Widget) -> Self {
		self.widget = widget;
		self
	}

	pub fn error_message(
		mut self,
		error_type: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		self.error_messages
			.insert(error_type.into(), message.into());
		self
	}

	fn message(&self, error_type: &str, fallback: &str) -> String {
		self.error_messages
			.get(error_type)
			.cloned()
			.unwrap_or_else(|| fallback.to_string())
	}

	fn invalid_choice(&self) -> FieldError {
		FieldError::InvalidChoice(self.message("invalid_choice", "Select a valid choice."))
	}
}

impl std::fmt::Debug for ModelChoiceField {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ModelChoiceField")
			.field("name", &self.name)
			.field("required", &self.required)
			.field("disabled", &self.disabled)
			.field("queryset", &self.queryset)
			.finish()
	}
}

impl FormField for ModelChoiceField {
	fn name(&self) -> &str {
		&self.name
	}

	fn widget(&self) -> &Widget {
		&self.widget
	}

	fn required(&self) -> bool {
		self.required
	}

	fn disabled(&self) -> bool {
		self.disabled
	}

	fn initial(&self) -> Option<&Value> {
		self.initial.as_ref()
	}

	fn clean(&self, value: Option<&Value>) -> FieldResult<Value> {
		if is_empty_value(value) {
			if self.required {
				return Err(FieldError::Required(
					self.message("required", "This field is required."),
				));
			}
			return Ok(Value::Null);
		}

		let Some(key) = value.and_then(value_as_text) else {
			return Err(self.invalid_choice());
		};

		match self.queryset.clone().filter_pk(key.as_str()).all() {
			Ok(mut rows) if !rows.is_empty() => Ok(Value::Object(rows.swap_remove(0))),
			Ok(_) => Err(self.invalid_choice()),
			Err(e) => {
				tracing::warn!(
					field = %self.name,
					model = %self.queryset.meta().name,
					error = %e,
					"queryset lookup failed"
				);
				Err(self.invalid_choice())
			}
		}
	}

	fn as_queryset_field(&self) -> Option<&dyn QuerysetField> {
		Some(self)
	}

	fn as_queryset_field_mut(&mut self) -> Option<&mut dyn QuerysetField> {
		Some(self)
	}
}

impl QuerysetField for ModelChoiceField {
	fn queryset(&self) -> &QuerySet {
		&self.queryset
	}

	fn set_queryset(&mut self, queryset: QuerySet) {
		self.queryset = queryset;
	}
}
