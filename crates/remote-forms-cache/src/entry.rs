//! Stored values and their deadlines

use serde_json::Value;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
	pub(crate) value: Value,
	deadline: Option<Instant>,
}

impl CacheEntry {
	pub(crate) fn new(value: Value, ttl: Option<Duration>) -> Self {
		Self {
			value,
			deadline: ttl.map(|ttl| Instant::now() + ttl),
		}
	}

	pub(crate) fn is_live(&self) -> bool {
		self.deadline.is_none_or(|deadline| Instant::now() < deadline)
	}
}
