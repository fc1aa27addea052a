//! The choices endpoint behind remote select widgets

use crate::core::View;
use async_trait::async_trait;
use hyper::Method;
use remote_forms_cache::{Cache, choices_cache_key};
use remote_forms_conf::CacheSettings;
use remote_forms_core::exception::{Error, Result};
use remote_forms_http::{Handler, Request, Response};
use remote_forms_orm::{Manager, ModelMeta, QuerySet};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// One `(value, label)` option, serialized as a two-element JSON array
pub type ChoiceRow = (Value, Value);

/// Default lifetime of a cached listing
pub const DEFAULT_CHOICES_TTL: Duration = Duration::from_secs(60 * 15);

/// Query parameters accepted as filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AllowedFilters {
	/// Every declared field of the model
	#[default]
	All,
	Only(Vec<String>),
}

/// Lists a model's rows as `(value, label)` pairs
///
/// Query parameters named in the allow-list become equality filters; any
/// other parameter is ignored. Results are cached under
/// `"{model}_choices_{hash}"`, where the hash covers only the applied
/// filters, for [`DEFAULT_CHOICES_TTL`] unless configured otherwise.
///
/// # Examples
///
/// ```
/// use remote_forms_cache::InMemoryCache;
/// use remote_forms_http::{Handler, Request};
/// use remote_forms_orm::{InMemoryManager, ModelMeta};
/// use remote_forms_views::{AllowedFilters, ModelChoicesView};
/// use serde_json::{json, Value};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let cities = InMemoryManager::new(ModelMeta::new("City", "id", ["id", "name", "state"]))
///     .with_json(json!([
///         {"id": 1, "name": "Salvador", "state": "BA"},
///         {"id": 2, "name": "Fortaleza", "state": "CE"},
///     ]))
///     .unwrap();
///
/// let view = ModelChoicesView::new(Arc::new(cities), InMemoryCache::new())
///     .with_allowed_filters(AllowedFilters::Only(vec!["state".into()]));
///
/// let request = Request::builder().uri("/choices/cities/?state=CE").build().unwrap();
/// let response = view.handle(request).await.unwrap();
///
/// let rows: Value = response.json().unwrap();
/// assert_eq!(rows, json!([[2, "Fortaleza"]]));
/// # }
/// ```
pub struct ModelChoicesView<C> {
	manager: Arc<dyn Manager>,
	cache: C,
	value_field: String,
	text_field: String,
	allowed_filters: AllowedFilters,
	ttl: Duration,
}

impl<C: Cache> ModelChoicesView<C> {
	pub fn new(manager: Arc<dyn Manager>, cache: C) -> Self {
		Self {
			manager,
			cache,
			value_field: "pk".to_string(),
			text_field: "name".to_string(),
			allowed_filters: AllowedFilters::All,
			ttl: DEFAULT_CHOICES_TTL,
		}
	}

	pub fn with_value_field(mut self, field: impl Into<String>) -> Self {
		self.value_field = field.into();
		self
	}

	pub fn with_text_field(mut self, field: impl Into<String>) -> Self {
		self.text_field = field.into();
		self
	}

	pub fn with_allowed_filters(mut self, allowed: AllowedFilters) -> Self {
		self.allowed_filters = allowed;
		self
	}

	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = ttl;
		self
	}

	/// Take the cache lifetime from settings
	pub fn with_settings(self, settings: &CacheSettings) -> Self {
		self.with_ttl(settings.choices_ttl())
	}

	pub fn cache(&self) -> &C {
		&self.cache
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	pub fn get_value_field(&self) -> &str {
		&self.value_field
	}

	pub fn get_text_field(&self) -> &str {
		&self.text_field
	}

	pub fn get_model(&self) -> &ModelMeta {
		self.manager.meta()
	}

	pub fn get_allowed_filters(&self) -> Vec<String> {
		match &self.allowed_filters {
			AllowedFilters::All => self.get_model().fields.clone(),
			AllowedFilters::Only(fields) => fields.clone(),
		}
	}

	pub fn get_queryset(&self) -> QuerySet {
		QuerySet::new(self.manager.clone())
	}

	/// Allow-listed query parameters, sorted by name
	pub fn applied_filters(&self, query_params: &HashMap<String, String>) -> Vec<(String, String)> {
		let allowed = self.get_allowed_filters();
		let mut applied: Vec<(String, String)> = query_params
			.iter()
			.filter(|(key, _)| allowed.iter().any(|a| a == *key))
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect();
		applied.sort();
		applied
	}

	/// Filter and project the queryset, bypassing the cache
	///
	/// # Errors
	///
	/// An allow-listed or projected field the model does not declare yields
	/// [`Error::ImproperlyConfigured`].
	pub fn get_data(&self, query_params: &HashMap<String, String>) -> Result<Vec<ChoiceRow>> {
		let queryset = self
			.applied_filters(query_params)
			.into_iter()
			.fold(self.get_queryset(), |qs, (field, value)| qs.filter_eq(field, value));

		Ok(queryset.values_list(&self.value_field, &self.text_field)?)
	}

	pub fn cache_key(&self, query_params: &HashMap<String, String>) -> String {
		choices_cache_key(&self.get_model().name, &self.applied_filters(query_params))
	}

	/// Cached listing for `request`'s query parameters
	pub async fn get(&self, request: &Request) -> Result<Response> {
		let key = self.cache_key(&request.query_params);

		if let Some(rows) = self.cache.get::<Vec<ChoiceRow>>(&key).await? {
			tracing::debug!(%key, rows = rows.len(), "choices cache hit");
			return Response::ok().with_json(&rows);
		}

		let rows = self.get_data(&request.query_params)?;
		tracing::debug!(%key, rows = rows.len(), "choices cache miss");
		self.cache.set(&key, &rows, Some(self.ttl)).await?;

		Response::ok().with_json(&rows)
	}
}

#[async_trait]
impl<C: Cache + 'static> View for ModelChoicesView<C> {
	async fn dispatch(&self, request: Request) -> Result<Response> {
		match request.method {
			Method::GET => self.get(&request).await,
			Method::HEAD => Ok(self.get(&request).await?.with_body(Vec::new())),
			_ => Err(Error::MethodNotAllowed(request.method.to_string())),
		}
	}

}

#[async_trait]
impl<C: Cache + 'static> Handler for ModelChoicesView<C> {
	async fn handle(&self, request: Request) -> Result<Response> {
		self.respond(request).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use remote_forms_cache::InMemoryCache;
	use remote_forms_orm::{Filter, InMemoryManager, OrmResult, Record};
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::sync::atomic::{AtomicUsize, Ordering};

	/// Counts every fetch that reaches the backing collection
	struct CountingManager {
		inner: InMemoryManager,
		fetches: AtomicUsize,
	}

	impl Manager for CountingManager {
		fn meta(&self) -> &ModelMeta {
			self.inner.meta()
		}

		fn fetch(&self, filters: &[Filter]) -> OrmResult<Vec<Record>> {
			self.fetches.fetch_add(1, Ordering::SeqCst);
			self.inner.fetch(filters)
		}
	}

	#[fixture]
	fn cities() -> Arc<CountingManager> {
		let inner = InMemoryManager::new(ModelMeta::new("City", "id", ["id", "name", "state"]))
			.with_json(json!([
				{"id": 1, "name": "Salvador", "state": "BA"},
				{"id": 2, "name": "Feira de Santana", "state": "BA"},
				{"id": 3, "name": "Fortaleza", "state": "CE"},
			]))
			.unwrap();
		Arc::new(CountingManager {
			inner,
			fetches: AtomicUsize::new(0),
		})
	}

	fn request(method: Method, uri: &str) -> Request {
		Request::builder().method(method).uri(uri).build().unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_second_identical_call_skips_backing_store(cities: Arc<CountingManager>) {
		let view = ModelChoicesView::new(cities.clone(), InMemoryCache::new());

		let first = view.dispatch(request(Method::GET, "/c/?state=BA")).await.unwrap();
		let second = view.dispatch(request(Method::GET, "/c/?state=BA")).await.unwrap();

		assert_eq!(first.body, second.body);
		assert_eq!(cities.fetches.load(Ordering::SeqCst), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_empty_result_is_cached(cities: Arc<CountingManager>) {
		let view = ModelChoicesView::new(cities.clone(), InMemoryCache::new());

		for _ in 0..2 {
			let response = view.dispatch(request(Method::GET, "/c/?state=SP")).await.unwrap();
			assert_eq!(&response.body[..], b"[]");
		}
		assert_eq!(cities.fetches.load(Ordering::SeqCst), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_unlisted_parameter_equals_omitted(cities: Arc<CountingManager>) {
		let view = ModelChoicesView::new(cities.clone(), InMemoryCache::new())
			.with_allowed_filters(AllowedFilters::Only(vec!["state".into()]));

		let with_extra = request(Method::GET, "/c/?state=BA&name=Salvador&page=2");
		let without = request(Method::GET, "/c/?state=BA");

		assert_eq!(
			view.cache_key(&with_extra.query_params),
			view.cache_key(&without.query_params)
		);
		assert_eq!(
			view.get_data(&with_extra.query_params).unwrap(),
			view.get_data(&without.query_params).unwrap()
		);

		let a = view.dispatch(with_extra).await.unwrap();
		let b = view.dispatch(without).await.unwrap();
		assert_eq!(a.body, b.body);
	}

	#[rstest]
	fn test_all_filters_means_declared_fields(cities: Arc<CountingManager>) {
		let view = ModelChoicesView::new(cities, InMemoryCache::new());
		assert_eq!(view.get_allowed_filters(), vec!["id", "name", "state"]);
	}

	#[rstest]
	fn test_parameter_order_does_not_change_key(cities: Arc<CountingManager>) {
		let view = ModelChoicesView::new(cities, InMemoryCache::new());
		let a = request(Method::GET, "/c/?state=BA&name=Salvador");
		let b = request(Method::GET, "/c/?name=Salvador&state=BA");

		let key = view.cache_key(&a.query_params);
		assert_eq!(key, view.cache_key(&b.query_params));
		assert!(key.starts_with("City_choices_"));
	}

	#[rstest]
	fn test_custom_projection(cities: Arc<CountingManager>) {
		let view = ModelChoicesView::new(cities, InMemoryCache::new())
			.with_value_field("name")
			.with_text_field("state");

		let rows = view.get_data(&HashMap::from([("id".into(), "3".into())])).unwrap();
		assert_eq!(rows, vec![(json!("Fortaleza"), json!("CE"))]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_unknown_allowed_field_is_server_error(cities: Arc<CountingManager>) {
		let view = ModelChoicesView::new(cities, InMemoryCache::new())
			.with_allowed_filters(AllowedFilters::Only(vec!["region".into()]));

		let err = view
			.dispatch(request(Method::GET, "/c/?region=NE"))
			.await
			.unwrap_err();

		assert!(matches!(err, Error::ImproperlyConfigured(_)));
		assert_eq!(err.status_code(), hyper::StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[rstest]
	#[tokio::test]
	async fn test_unknown_text_field_is_server_error(cities: Arc<CountingManager>) {
		let view = ModelChoicesView::new(cities, InMemoryCache::new()).with_text_field("title");

		let err = view.dispatch(request(Method::GET, "/c/")).await.unwrap_err();
		assert_eq!(err.status_code(), hyper::StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[rstest]
	#[tokio::test]
	async fn test_head_has_no_body(cities: Arc<CountingManager>) {
		let view = ModelChoicesView::new(cities, InMemoryCache::new());

		let response = view.dispatch(request(Method::HEAD, "/c/")).await.unwrap();
		assert_eq!(response.status, hyper::StatusCode::OK);
		assert!(response.body.is_empty());
		assert_eq!(
			response.headers.get("content-type").unwrap(),
			"application/json"
		);
	}

	#[rstest]
	#[case(Method::POST)]
	#[case(Method::PUT)]
	#[case(Method::DELETE)]
	#[tokio::test]
	async fn test_write_methods_not_allowed(cities: Arc<CountingManager>, #[case] method: Method) {
		let view = ModelChoicesView::new(cities.clone(), InMemoryCache::new());

		let err = view.dispatch(request(method.clone(), "/c/")).await.unwrap_err();
		assert_eq!(err.status_code(), hyper::StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(err.to_string(), format!("Method not allowed: {}", method));
		assert_eq!(cities.fetches.load(Ordering::SeqCst), 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_handler_answers_refused_method_with_allow(cities: Arc<CountingManager>) {
		let view = ModelChoicesView::new(cities, InMemoryCache::new());

		let response = view.handle(request(Method::POST, "/c/")).await.unwrap();
		assert_eq!(response.status, hyper::StatusCode::METHOD_NOT_ALLOWED);
		assert_eq!(response.headers.get("allow").unwrap(), "GET, HEAD");
		let body: Value = response.json().unwrap();
		assert_eq!(body["detail"], "Method not allowed: POST");
	}

	/// Remembers the lifetime each key was stored with
	#[derive(Default)]
	struct TtlRecorder {
		inner: InMemoryCache,
		stored: std::sync::Mutex<Vec<(String, Option<Duration>)>>,
	}

	#[async_trait]
	impl Cache for TtlRecorder {
		async fn get<T>(&self, key: &str) -> Result<Option<T>>
		where
			T: for<'de> serde::Deserialize<'de> + Send,
		{
			self.inner.get(key).await
		}

		async fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<()>
		where
			T: serde::Serialize + Send + Sync,
		{
			self.stored.lock().unwrap().push((key.to_string(), ttl));
			self.inner.set(key, value, ttl).await
		}

		async fn delete(&self, key: &str) -> Result<()> {
			self.inner.delete(key).await
		}

		async fn has_key(&self, key: &str) -> Result<bool> {
			self.inner.has_key(key).await
		}

		async fn clear(&self) -> Result<()> {
			self.inner.clear().await
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_ttl_from_settings(cities: Arc<CountingManager>) {
		let cache = Arc::new(TtlRecorder::default());
		let view = ModelChoicesView::new(cities, cache.clone())
			.with_settings(&CacheSettings { choices_ttl_secs: 60 });
		assert_eq!(view.ttl(), Duration::from_secs(60));

		view.dispatch(request(Method::GET, "/c/")).await.unwrap();
		view.dispatch(request(Method::GET, "/c/")).await.unwrap();

		let key = view.cache_key(&HashMap::new());
		assert_eq!(
			*cache.stored.lock().unwrap(),
			vec![(key, Some(Duration::from_secs(60)))]
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_default_ttl_is_fifteen_minutes(cities: Arc<CountingManager>) {
		let cache = Arc::new(TtlRecorder::default());
		let view = ModelChoicesView::new(cities, cache.clone());

		view.dispatch(request(Method::GET, "/c/?state=CE")).await.unwrap();

		let stored = cache.stored.lock().unwrap();
		assert_eq!(stored[0].1, Some(Duration::from_secs(900)));
		assert!(stored[0].0.starts_with("City_choices_"));
	}
}
