//! Process-local cache backend

use crate::cache_trait::Cache;
use crate::entry::CacheEntry;
use async_trait::async_trait;
use remote_forms_core::exception::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache kept in a shared map
///
/// Values are stored as JSON. Expired entries are dropped when a read finds
/// them; `ttl = None` keeps an entry until it is overwritten or deleted.
/// Clones share the same map.
///
/// # Examples
///
/// ```
/// use remote_forms_cache::{Cache, InMemoryCache};
///
/// # #[tokio::main]
/// # async fn main() {
/// let cache = InMemoryCache::new();
/// cache.set("Category_choices_abc", &vec![(1, "Books")], None).await.unwrap();
///
/// let pairs: Option<Vec<(i64, String)>> = cache.get("Category_choices_abc").await.unwrap();
/// assert_eq!(pairs, Some(vec![(1, "Books".to_string())]));
/// # }
/// ```
#[derive(Clone, Default)]
pub struct InMemoryCache {
	entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl InMemoryCache {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl Cache for InMemoryCache {
	async fn get<T>(&self, key: &str) -> Result<Option<T>>
	where
		T: for<'de> Deserialize<'de> + Send,
	{
		let live = {
			let entries = self.entries.read().await;
			match entries.get(key) {
				None => return Ok(None),
				Some(entry) => entry.is_live().then(|| entry.value.clone()),
			}
		};

		let Some(value) = live else {
			let mut entries = self.entries.write().await;
			if entries.get(key).is_some_and(|entry| !entry.is_live()) {
				entries.remove(key);
				tracing::trace!(%key, "dropped expired cache entry");
			}
			return Ok(None);
		};

		serde_json::from_value(value)
			.map(Some)
			.map_err(|e| Error::Serialization(e.to_string()))
	}

	async fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<()>
	where
		T: Serialize + Send + Sync,
	{
		let value = serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))?;
		self.entries
			.write()
			.await
			.insert(key.to_string(), CacheEntry::new(value, ttl));
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<()> {
		self.entries.write().await.remove(key);
		Ok(())
	}

	async fn has_key(&self, key: &str) -> Result<bool> {
		let entries = self.entries.read().await;
		Ok(entries.get(key).is_some_and(CacheEntry::is_live))
	}

	async fn clear(&self) -> Result<()> {
		self.entries.write().await.clear();
		Ok(())
	}
}
