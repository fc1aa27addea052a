//! Model metadata

use crate::error::{OrmError, OrmResult};
use serde::Serialize;

/// A single row of a backing collection
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Alias accepted everywhere a field name is expected for the primary key
pub const PK_ALIAS: &str = "pk";

/// Static description of a model
///
/// # Examples
///
/// ```
/// use remote_forms_orm::ModelMeta;
///
/// let meta = ModelMeta::new("Category", "id", ["id", "name", "parent"]);
/// assert_eq!(meta.resolve_field("pk").unwrap(), "id");
/// assert_eq!(meta.resolve_field("parent").unwrap(), "parent");
/// assert!(meta.resolve_field("slug").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMeta {
	/// Model type name, used as the cache key namespace
	pub name: String,
	pub pk_field: String,
	/// Declared field names, primary key included
	pub fields: Vec<String>,
}

impl ModelMeta {
	pub fn new<I, S>(name: impl Into<String>, pk_field: impl Into<String>, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let pk_field = pk_field.into();
		let mut fields: Vec<String> = fields.into_iter().map(Into::into).collect();
		if !fields.contains(&pk_field) {
			fields.insert(0, pk_field.clone());
		}
		Self {
			name: name.into(),
			pk_field,
			fields,
		}
	}

	/// Map a field name (or the `pk` alias) to a declared field
	pub fn resolve_field<'a>(&'a self, name: &'a str) -> OrmResult<&'a str> {
		if name == PK_ALIAS {
			return Ok(&self.pk_field);
		}
		if self.fields.iter().any(|f| f == name) {
			Ok(name)
		} else {
			Err(OrmError::UnknownField {
				model: self.name.clone(),
				field: name.to_string(),
			})
		}
	}

	pub fn has_field(&self, name: &str) -> bool {
		self.resolve_field(name).is_ok()
	}
}

/// A typed model whose instances serialize into [`Record`]s
///
/// # Examples
///
/// ```
/// use remote_forms_orm::Model;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct City {
///     id: i64,
///     name: String,
///     state: String,
/// }
///
/// impl Model for City {
///     fn model_name() -> &'static str { "City" }
///     fn field_names() -> Vec<&'static str> { vec!["id", "name", "state"] }
/// }
///
/// let meta = City::meta();
/// assert_eq!(meta.pk_field, "id");
/// assert_eq!(meta.fields, vec!["id", "name", "state"]);
/// ```
pub trait Model: Serialize {
	fn model_name() -> &'static str;

	fn primary_key_field() -> &'static str {
		"id"
	}

	fn field_names() -> Vec<&'static str>;

	fn meta() -> ModelMeta {
		ModelMeta::new(
			Self::model_name(),
			Self::primary_key_field(),
			Self::field_names(),
		)
	}

	fn to_record(&self) -> OrmResult<Record> {
		match serde_json::to_value(self) {
			Ok(serde_json::Value::Object(map)) => Ok(map),
			Ok(other) => Err(OrmError::Serialization(format!(
				"{} did not serialize to an object: {}",
				Self::model_name(),
				other
			))),
			Err(e) => Err(OrmError::Serialization(e.to_string())),
		}
	}
}
