//! Form state: fields, submitted data, initial values and errors

use crate::field::{FieldError, FormField};
use remote_forms_orm::Record;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Field error in {field}: {error}")]
	Field { field: String, error: FieldError },
	#[error("Validation error: {0}")]
	Validation(String),
	#[error("Form has no field named '{0}'")]
	UnknownField(String),
}

impl From<FormError> for remote_forms_core::Error {
	fn from(err: FormError) -> Self {
		remote_forms_core::Error::Validation(err.to_string())
	}
}

pub type FormResult<T> = Result<T, FormError>;

/// Key for form-level (non-field-specific) errors
pub const ALL_FIELDS_KEY: &str = "_all";

/// Form data structure
///
/// Errors are keyed by the unprefixed field name; submitted data is looked
/// up under the prefixed name (see [`Form::add_prefix`]).
pub struct Form {
	fields: Vec<Box<dyn FormField>>,
	data: HashMap<String, Value>,
	initial: HashMap<String, Value>,
	instance: Option<Record>,
	errors: HashMap<String, Vec<String>>,
	cleaned_data: HashMap<String, Value>,
	is_bound: bool,
	is_cleaned: bool,
	prefix: String,
	/// Bumped on every `bind`
	revision: u64,
	prepared_revision: Option<u64>,
}

impl Form {
	/// Create a new empty form
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_forms::Form;
	///
	/// let form = Form::new();
	/// assert!(!form.is_bound());
	/// assert!(form.fields().is_empty());
	/// ```
	pub fn new() -> Self {
		Self {
			fields: Vec::new(),
			data: HashMap::new(),
			initial: HashMap::new(),
			instance: None,
			errors: HashMap::new(),
			cleaned_data: HashMap::new(),
			is_bound: false,
			is_cleaned: false,
			prefix: String::new(),
			revision: 0,
			prepared_revision: None,
		}
	}

	pub fn with_initial(initial: HashMap<String, Value>) -> Self {
		Self {
			initial,
			..Self::new()
		}
	}

	/// Create a form whose field names are submitted as `"{prefix}-{name}"`
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_forms::Form;
	///
	/// let form = Form::with_prefix("shipping");
	/// assert_eq!(form.add_prefix("city"), "shipping-city");
	/// assert_eq!(Form::new().add_prefix("city"), "city");
	/// ```
	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			..Self::new()
		}
	}

	/// Attach the persisted row this form edits
	pub fn with_instance(mut self, instance: Record) -> Self {
		self.instance = Some(instance);
		self
	}

	pub fn add_field(&mut self, field: Box<dyn FormField>) {
		self.fields.push(field);
		self.is_cleaned = false;
	}

	/// Attach submitted data; the form becomes bound
	pub fn bind(&mut self, data: HashMap<String, Value>) {
		self.data = data;
		self.is_bound = true;
		self.is_cleaned = false;
		self.revision += 1;
	}

	/// Whether the current data went through a pipeline's `prepare`
	pub fn is_prepared(&self) -> bool {
		self.prepared_revision == Some(self.revision)
	}

	pub(crate) fn mark_prepared(&mut self) {
		self.prepared_revision = Some(self.revision);
	}

	/// Clean every field, replacing previously recorded errors
	///
	/// Disabled fields are cleaned from their initial value, never from
	/// submitted data.
	pub fn full_clean(&mut self) {
		self.errors.clear();
		self.cleaned_data.clear();
		self.is_cleaned = true;

		if !self.is_bound {
			return;
		}

		for field in &self.fields {
			let name = field.name();
			let value = if field.disabled() {
				self.initial.get(name).or_else(|| field.initial())
			} else {
				self.data.get(&self.add_prefix(name))
			};

			match field.clean(value) {
				Ok(cleaned) => {
					self.cleaned_data.insert(name.to_string(), cleaned);
				}
				Err(e) => {
					self.errors
						.entry(name.to_string())
						.or_default()
						.push(e.to_string());
				}
			}
		}
	}

	/// Whether the form is bound and has no errors, cleaning it first if needed
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_forms::{CharField, Form};
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let mut form = Form::new();
	/// form.add_field(Box::new(CharField::new("name").required()));
	/// assert!(!form.is_valid());
	///
	/// form.bind(HashMap::from([("name".to_string(), json!("Ada"))]));
	/// assert!(form.is_valid());
	/// assert_eq!(form.cleaned_data()["name"], json!("Ada"));
	/// ```
	pub fn is_valid(&mut self) -> bool {
		if !self.is_bound {
			return false;
		}
		self.ensure_cleaned();
		self.errors.is_empty()
	}

	/// Run [`full_clean`](Form::full_clean) unless the current data was
	/// already cleaned
	pub fn ensure_cleaned(&mut self) {
		if self.is_bound && !self.is_cleaned {
			self.full_clean();
		}
	}

	/// Record an error against `field`, or against the whole form for `None`
	///
	/// A bound form is cleaned first, so the error survives the next
	/// validity check.
	///
	/// # Errors
	///
	/// Returns [`FormError::UnknownField`] when the form has no such field.
	pub fn add_error(&mut self, field: Option<&str>, message: impl Into<String>) -> FormResult<()> {
		let key = match field {
			Some(name) if self.get_field(name).is_none() => {
				return Err(FormError::UnknownField(name.to_string()));
			}
			Some(name) => name.to_string(),
			None => ALL_FIELDS_KEY.to_string(),
		};

		self.ensure_cleaned();
		self.cleaned_data.remove(&key);
		self.errors.entry(key).or_default().push(message.into());
		Ok(())
	}

	/// Drop every error recorded for `field`
	pub fn remove_errors(&mut self, field: &str) -> Option<Vec<String>> {
		self.errors.remove(field)
	}

	pub fn add_prefix(&self, field_name: &str) -> String {
		if self.prefix.is_empty() {
			field_name.to_string()
		} else {
			format!("{}-{}", self.prefix, field_name)
		}
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn is_bound(&self) -> bool {
		self.is_bound
	}

	pub fn data(&self) -> &HashMap<String, Value> {
		&self.data
	}

	pub fn initial(&self) -> &HashMap<String, Value> {
		&self.initial
	}

	pub fn instance(&self) -> Option<&Record> {
		self.instance.as_ref()
	}

	pub fn errors(&self) -> &HashMap<String, Vec<String>> {
		&self.errors
	}

	pub fn cleaned_data(&self) -> &HashMap<String, Value> {
		&self.cleaned_data
	}

	pub fn fields(&self) -> &[Box<dyn FormField>] {
		&self.fields
	}

	pub fn get_field(&self, name: &str) -> Option<&dyn FormField> {
		self.fields
			.iter()
			.find(|f| f.name() == name)
			.map(|f| &**f)
	}

	/// Mutable access to a field; the form is cleaned again on the next
	/// validity check
	pub fn get_field_mut(&mut self, name: &str) -> Option<&mut (dyn FormField + 'static)> {
		self.is_cleaned = false;
		self.fields
			.iter_mut()
			.find(|f| f.name() == name)
			.map(|f| &mut **f)
	}
}

impl Default for Form {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Form {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let names: Vec<&str> = self.fields.iter().map(|field| field.name()).collect();
		f.debug_struct("Form")
			.field("fields", &names)
			.field("prefix", &self.prefix)
			.field("is_bound", &self.is_bound)
			.field("errors", &self.errors)
			.finish()
	}
}
