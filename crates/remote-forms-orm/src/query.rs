//! Filters and lazily evaluated querysets

use crate::error::OrmResult;
use crate::manager::Manager;
use crate::model::{ModelMeta, PK_ALIAS, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
	String(String),
	Integer(i64),
	Float(f64),
	Boolean(bool),
	Null,
}

impl FilterValue {
	/// Textual form used for comparisons, so `"3"` and `3` compare equal
	fn as_text(&self) -> Option<String> {
		match self {
			FilterValue::String(s) => Some(s.clone()),
			FilterValue::Integer(i) => Some(i.to_string()),
			FilterValue::Float(f) => Some(f.to_string()),
			FilterValue::Boolean(b) => Some(b.to_string()),
			FilterValue::Null => None,
		}
	}

	fn equals(&self, value: &Value) -> bool {
		match (self, value) {
			(FilterValue::Null, Value::Null) => true,
			(FilterValue::Null, _) | (_, Value::Null) => false,
			(_, Value::Bool(b)) => match self.as_text() {
				Some(text) => {
					let text = text.to_ascii_lowercase();
					if *b {
						text == "true" || text == "1"
					} else {
						text == "false" || text == "0"
					}
				}
				None => false,
			},
			(_, other) => match (self.as_text(), value_text(other)) {
				(Some(a), Some(b)) => a == b,
				_ => false,
			},
		}
	}
}

fn value_text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		Value::Null => None,
		other => Some(other.to_string()),
	}
}

impl From<&str> for FilterValue {
	fn from(value: &str) -> Self {
		FilterValue::String(value.to_string())
	}
}

impl From<String> for FilterValue {
	fn from(value: String) -> Self {
		FilterValue::String(value)
	}
}

impl From<i64> for FilterValue {
	fn from(value: i64) -> Self {
		FilterValue::Integer(value)
	}
}

impl From<bool> for FilterValue {
	fn from(value: bool) -> Self {
		FilterValue::Boolean(value)
	}
}

impl From<&Value> for FilterValue {
	fn from(value: &Value) -> Self {
		match value {
			Value::Null => FilterValue::Null,
			Value::Bool(b) => FilterValue::Boolean(*b),
			Value::Number(n) => match n.as_i64() {
				Some(i) => FilterValue::Integer(i),
				None => FilterValue::Float(n.as_f64().unwrap_or_default()),
			},
			Value::String(s) => FilterValue::String(s.clone()),
			Value::Array(_) | Value::Object(_) => FilterValue::String(value.to_string()),
		}
	}
}

impl fmt::Display for FilterValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FilterValue::Null => f.write_str("null"),
			other => f.write_str(&other.as_text().unwrap_or_default()),
		}
	}
}

/// Equality test of one field against a value
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
	pub field: String,
	pub value: FilterValue,
}

impl Filter {
	pub fn exact(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
		Self {
			field: field.into(),
			value: value.into(),
		}
	}

	/// Check a record against this filter
	///
	/// The field name must already be resolved against the model's metadata.
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_orm::{Filter, Record};
	/// use serde_json::json;
	///
	/// let record: Record = serde_json::from_value(json!({"id": 3, "name": "Books"})).unwrap();
	/// assert!(Filter::exact("id", "3").matches("id", &record));
	/// assert!(!Filter::exact("id", "4").matches("id", &record));
	/// ```
	pub fn matches(&self, resolved_field: &str, record: &Record) -> bool {
		self.value.equals(record.get(resolved_field).unwrap_or(&Value::Null))
	}
}

/// Lazily evaluated set of rows from a [`Manager`]
///
/// Building a queryset never touches the backing collection; only
/// [`all`](QuerySet::all) and the methods built on it do.
///
/// # Examples
///
/// ```
/// use remote_forms_orm::{InMemoryManager, ModelMeta, QuerySet};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let manager = InMemoryManager::new(ModelMeta::new("Category", "id", ["id", "name"]))
///     .with_json(json!([{"id": 1, "name": "Books"}, {"id": 2, "name": "Games"}]))
///     .unwrap();
///
/// let queryset = QuerySet::new(Arc::new(manager)).filter_pk("2");
/// let rows = queryset.values_list("pk", "name").unwrap();
/// assert_eq!(rows, vec![(json!(2), json!("Games"))]);
/// ```
#[derive(Clone)]
pub struct QuerySet {
	manager: Arc<dyn Manager>,
	filters: Vec<Filter>,
	empty: bool,
}

impl QuerySet {
	/// All rows of the manager's model
	pub fn new(manager: Arc<dyn Manager>) -> Self {
		Self {
			manager,
			filters: Vec::new(),
			empty: false,
		}
	}

	/// An always-empty queryset that still knows its model
	pub fn none_of(manager: Arc<dyn Manager>) -> Self {
		Self {
			manager,
			filters: Vec::new(),
			empty: true,
		}
	}

	/// Turn this queryset into an always-empty one
	pub fn none(mut self) -> Self {
		self.empty = true;
		self
	}

	/// A fresh, unfiltered queryset over the same model
	pub fn model(&self) -> QuerySet {
		QuerySet::new(self.manager.clone())
	}

	pub fn meta(&self) -> &ModelMeta {
		self.manager.meta()
	}

	pub fn manager(&self) -> &Arc<dyn Manager> {
		&self.manager
	}

	pub fn filters(&self) -> &[Filter] {
		&self.filters
	}

	pub fn is_none(&self) -> bool {
		self.empty
	}

	pub fn filter(mut self, filter: Filter) -> Self {
		self.filters.push(filter);
		self
	}

	pub fn filter_eq(self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
		self.filter(Filter::exact(field, value))
	}

	/// Restrict to rows whose primary key equals `value`
	pub fn filter_pk(self, value: impl Into<FilterValue>) -> Self {
		self.filter_eq(PK_ALIAS, value)
	}

	/// Evaluate the queryset
	///
	/// # Errors
	///
	/// Returns [`OrmError::UnknownField`](crate::OrmError::UnknownField) when a
	/// filter names a field the model does not declare, or whatever the manager
	/// reports.
	pub fn all(&self) -> OrmResult<Vec<Record>> {
		let meta = self.manager.meta();
		let resolved: Vec<Filter> = self
			.filters
			.iter()
			.map(|filter| {
				meta.resolve_field(&filter.field).map(|field| Filter {
					field: field.to_string(),
					..filter.clone()
				})
			})
			.collect::<OrmResult<_>>()?;

		if self.empty {
			return Ok(Vec::new());
		}

		self.manager.fetch(&resolved)
	}

	pub fn count(&self) -> OrmResult<usize> {
		Ok(self.all()?.len())
	}

	/// Primary keys of all rows, in manager order
	pub fn pks(&self) -> OrmResult<Vec<Value>> {
		let pk_field = self.meta().pk_field.clone();
		Ok(self
			.all()?
			.into_iter()
			.map(|mut record| record.remove(&pk_field).unwrap_or(Value::Null))
			.collect())
	}

	/// Project every row into a `(value, label)` pair
	pub fn values_list(&self, value_field: &str, label_field: &str) -> OrmResult<Vec<(Value, Value)>> {
		let meta = self.manager.meta();
		let value_field = meta.resolve_field(value_field)?.to_string();
		let label_field = meta.resolve_field(label_field)?.to_string();

		Ok(self
			.all()?
			.into_iter()
			.map(|mut record| {
				let value = record.remove(&value_field).unwrap_or(Value::Null);
				let label = if value_field == label_field {
					value.clone()
				} else {
					record.remove(&label_field).unwrap_or(Value::Null)
				};
				(value, label)
			})
			.collect())
	}
}

impl fmt::Debug for QuerySet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("QuerySet")
			.field("model", &self.manager.meta().name)
			.field("filters", &self.filters)
			.field("empty", &self.empty)
			.finish()
	}
}
