//! The field abstraction shared by every form input

use crate::widgets::Widget;
use remote_forms_orm::QuerySet;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	#[error("{0}")]
	Required(String),
	#[error("{0}")]
	InvalidChoice(String),
	#[error("{0}")]
	Validation(String),
}

pub type FieldResult<T> = Result<T, FieldError>;

/// A form input
///
/// `clean` turns the raw submitted value into its cleaned form or explains
/// why it is invalid.
pub trait FormField: Send + Sync {
	fn name(&self) -> &str;

	fn label(&self) -> Option<&str> {
		None
	}

	fn required(&self) -> bool;

	/// Disabled fields are not user-editable; the form cleans their initial
	/// value instead of submitted data
	fn disabled(&self) -> bool {
		false
	}

	fn widget(&self) -> &Widget;

	fn initial(&self) -> Option<&Value> {
		None
	}

	fn clean(&self, value: Option<&Value>) -> FieldResult<Value>;

	/// Fields whose allowed values come from a queryset expose it here
	fn as_queryset_field(&self) -> Option<&dyn QuerysetField> {
		None
	}

	fn as_queryset_field_mut(&mut self) -> Option<&mut dyn QuerysetField> {
		None
	}
}

/// Capability of fields that validate against a queryset
pub trait QuerysetField {
	fn queryset(&self) -> &QuerySet;

	fn set_queryset(&mut self, queryset: QuerySet);
}

/// Raw submitted value as text, for fields that compare against string keys
pub(crate) fn value_as_text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}

/// `None`, `null` and `""` all mean "nothing submitted"
pub(crate) fn is_empty_value(value: Option<&Value>) -> bool {
	match value {
		None | Some(Value::Null) => true,
		Some(Value::String(s)) => s.is_empty(),
		Some(Value::Array(items)) => items.is_empty(),
		Some(_) => false,
	}
}
