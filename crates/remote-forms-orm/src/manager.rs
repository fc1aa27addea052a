//! Backing collections

use crate::error::{OrmError, OrmResult};
use crate::model::{Model, ModelMeta, Record};
use crate::query::Filter;
use parking_lot::RwLock;
use serde_json::Value;

/// The backing collection of one model
///
/// Implementations receive filters whose field names are already resolved
/// against [`meta`](Manager::meta), so `pk` never reaches them.
pub trait Manager: Send + Sync {
	fn meta(&self) -> &ModelMeta;

	/// Rows matching every filter, in a stable order
	fn fetch(&self, filters: &[Filter]) -> OrmResult<Vec<Record>>;
}

/// Manager over rows held in memory
///
/// # Examples
///
/// ```
/// use remote_forms_orm::{InMemoryManager, Manager, Model};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct State {
///     id: i64,
///     name: String,
/// }
///
/// impl Model for State {
///     fn model_name() -> &'static str { "State" }
///     fn field_names() -> Vec<&'static str> { vec!["id", "name"] }
/// }
///
/// let manager = InMemoryManager::from_models(vec![
///     State { id: 1, name: "Bahia".into() },
///     State { id: 2, name: "Ceará".into() },
/// ])
/// .unwrap();
///
/// assert_eq!(manager.meta().name, "State");
/// assert_eq!(manager.fetch(&[]).unwrap().len(), 2);
/// ```
pub struct InMemoryManager {
	meta: ModelMeta,
	records: RwLock<Vec<Record>>,
}

impl InMemoryManager {
	pub fn new(meta: ModelMeta) -> Self {
		Self {
			meta,
			records: RwLock::new(Vec::new()),
		}
	}

	pub fn from_models<M: Model>(models: Vec<M>) -> OrmResult<Self> {
		let manager = Self::new(M::meta());
		for model in &models {
			manager.insert(model.to_record()?);
		}
		Ok(manager)
	}

	/// Load rows from a JSON array of objects
	pub fn with_json(self, rows: Value) -> OrmResult<Self> {
		let records: Vec<Record> =
			serde_json::from_value(rows).map_err(|e| OrmError::Serialization(e.to_string()))?;
		self.records.write().extend(records);
		Ok(self)
	}

	pub fn insert(&self, record: Record) {
		self.records.write().push(record);
	}

	pub fn len(&self) -> usize {
		self.records.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.read().is_empty()
	}
}

impl Manager for InMemoryManager {
	fn meta(&self) -> &ModelMeta {
		&self.meta
	}

	fn fetch(&self, filters: &[Filter]) -> OrmResult<Vec<Record>> {
		let records = self.records.read();
		let rows: Vec<Record> = records
			.iter()
			.filter(|record| filters.iter().all(|f| f.matches(&f.field, record)))
			.cloned()
			.collect();

		tracing::trace!(
			model = %self.meta.name,
			filters = filters.len(),
			rows = rows.len(),
			"fetched rows"
		);
		Ok(rows)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_with_json_rejects_non_objects() {
		let result = InMemoryManager::new(ModelMeta::new("Tag", "id", ["id"])).with_json(json!([1, 2]));
		assert!(matches!(result, Err(OrmError::Serialization(_))));
	}

	#[rstest]
	fn test_fetch_applies_all_filters() {
		let manager = InMemoryManager::new(ModelMeta::new("City", "id", ["id", "name", "state"]))
			.with_json(json!([
				{"id": 1, "name": "Salvador", "state": "BA"},
				{"id": 2, "name": "Feira", "state": "BA"},
				{"id": 3, "name": "Fortaleza", "state": "CE"},
			]))
			.unwrap();

		let rows = manager
			.fetch(&[Filter::exact("state", "BA"), Filter::exact("name", "Feira")])
			.unwrap();
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0]["id"], json!(2));
	}

	#[rstest]
	fn test_insert_after_construction() {
		let manager = InMemoryManager::new(ModelMeta::new("Tag", "id", ["id", "name"]));
		assert!(manager.is_empty());

		let record: Record = serde_json::from_value(json!({"id": 9, "name": "rust"})).unwrap();
		manager.insert(record);
		assert_eq!(manager.len(), 1);
	}
}
