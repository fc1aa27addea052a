//! Shared fixtures for the remote-forms integration tests
//!
//! A small State/City dataset where each city points at its state by
//! primary key, the shape chained selects are built for.

use remote_forms_orm::{Filter, InMemoryManager, Manager, ModelMeta, OrmResult, Record};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn states() -> InMemoryManager {
	InMemoryManager::new(ModelMeta::new("State", "id", ["id", "name", "code"]))
		.with_json(json!([
			{"id": 1, "name": "Bahia", "code": "BA"},
			{"id": 2, "name": "Ceará", "code": "CE"},
			{"id": 3, "name": "Pernambuco", "code": "PE"},
		]))
		.expect("state fixture rows are objects")
}

pub fn cities() -> InMemoryManager {
	InMemoryManager::new(ModelMeta::new("City", "id", ["id", "name", "state"]))
		.with_json(json!([
			{"id": 10, "name": "Salvador", "state": 1},
			{"id": 11, "name": "Feira de Santana", "state": 1},
			{"id": 20, "name": "Fortaleza", "state": 2},
			{"id": 30, "name": "Recife", "state": 3},
			{"id": 31, "name": "Olinda", "state": 3},
		]))
		.expect("city fixture rows are objects")
}

/// Wraps a manager and counts fetches reaching it
pub struct CountingManager<M> {
	inner: M,
	fetches: AtomicUsize,
}

impl<M: Manager> CountingManager<M> {
	pub fn new(inner: M) -> Arc<Self> {
		Arc::new(Self {
			inner,
			fetches: AtomicUsize::new(0),
		})
	}

	pub fn fetches(&self) -> usize {
		self.fetches.load(Ordering::SeqCst)
	}
}

impl<M: Manager> Manager for CountingManager<M> {
	fn meta(&self) -> &ModelMeta {
		self.inner.meta()
	}

	fn fetch(&self, filters: &[Filter]) -> OrmResult<Vec<Record>> {
		self.fetches.fetch_add(1, Ordering::SeqCst);
		self.inner.fetch(filters)
	}
}
