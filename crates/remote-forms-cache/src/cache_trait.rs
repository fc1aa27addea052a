//! The cache collaborator

use async_trait::async_trait;
use remote_forms_core::exception::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Key/value store with per-entry expiry
///
/// Eviction and persistence belong to the backend. Writers race freely; the
/// last `set` for a key wins.
#[async_trait]
pub trait Cache: Send + Sync {
	/// Get a value, `None` on a miss or an expired entry
	async fn get<T>(&self, key: &str) -> Result<Option<T>>
	where
		T: for<'de> Deserialize<'de> + Send;

	/// Store a value; `ttl = None` keeps it until overwritten or deleted
	async fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<()>
	where
		T: Serialize + Send + Sync;

	async fn delete(&self, key: &str) -> Result<()>;

	async fn has_key(&self, key: &str) -> Result<bool>;

	async fn clear(&self) -> Result<()>;
}

#[async_trait]
impl<C: Cache> Cache for std::sync::Arc<C> {
	async fn get<T>(&self, key: &str) -> Result<Option<T>>
	where
		T: for<'de> Deserialize<'de> + Send,
	{
		(**self).get(key).await
	}

	async fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<()>
	where
		T: Serialize + Send + Sync,
	{
		(**self).set(key, value, ttl).await
	}

	async fn delete(&self, key: &str) -> Result<()> {
		(**self).delete(key).await
	}

	async fn has_key(&self, key: &str) -> Result<bool> {
		(**self).has_key(key).await
	}

	async fn clear(&self) -> Result<()> {
		(**self).clear().await
	}
}
