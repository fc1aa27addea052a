//! Choice endpoints mounted on a router and configured from settings

use hyper::{Method, StatusCode};
use remote_forms_cache::{Cache, InMemoryCache, choices_cache_key};
use remote_forms_conf::Settings;
use remote_forms_http::{Handler, Request, Response};
use remote_forms_integration_tests::{CountingManager, cities, states};
use remote_forms_urls::UrlRouter;
use remote_forms_views::{AllowedFilters, ModelChoicesView};
use rstest::rstest;
use serde_json::{Value, json};
use serial_test::serial;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

async fn call(router: &UrlRouter, method: Method, uri: &str) -> Response {
	let request = Request::builder().method(method).uri(uri).build().unwrap();
	match router.handle(request).await {
		Ok(response) => response,
		Err(err) => Response::from_error(&err),
	}
}

#[rstest]
#[tokio::test]
async fn test_chained_listing_through_router() {
	let cache = Arc::new(InMemoryCache::new());
	let city_manager = CountingManager::new(cities());
	let router = UrlRouter::new()
		.route_named(
			"state-choices",
			"/choices/states/",
			Arc::new(ModelChoicesView::new(Arc::new(states()), cache.clone()).with_value_field("code")),
		)
		.route_named(
			"city-choices",
			"/choices/cities/",
			Arc::new(
				ModelChoicesView::new(city_manager.clone(), cache.clone())
					.with_allowed_filters(AllowedFilters::Only(vec!["state".into()])),
			),
		);

	let response = call(&router, Method::GET, "/choices/states/").await;
	assert_eq!(response.status, StatusCode::OK);
	let rows: Value = response.json().unwrap();
	assert_eq!(rows, json!([["BA", "Bahia"], ["CE", "Ceará"], ["PE", "Pernambuco"]]));

	let response = call(&router, Method::GET, "/choices/cities/?state=1&q=sal").await;
	let rows: Value = response.json().unwrap();
	assert_eq!(rows, json!([[10, "Salvador"], [11, "Feira de Santana"]]));

	call(&router, Method::GET, "/choices/cities/?state=1").await;
	assert_eq!(city_manager.fetches(), 1);
	let state_key = choices_cache_key("State", &[]);
	let city_key = choices_cache_key("City", &[("state".to_string(), "1".to_string())]);
	assert!(cache.has_key(&state_key).await.unwrap());
	assert!(cache.has_key(&city_key).await.unwrap());
	assert!(!cache.has_key(&choices_cache_key("City", &[])).await.unwrap());
}

#[rstest]
#[case(Method::POST, StatusCode::METHOD_NOT_ALLOWED)]
#[case(Method::HEAD, StatusCode::OK)]
#[tokio::test]
async fn test_method_handling(#[case] method: Method, #[case] status: StatusCode) {
	let router = UrlRouter::new().route(
		"/choices/states/",
		Arc::new(ModelChoicesView::new(Arc::new(states()), InMemoryCache::new())),
	);

	let response = call(&router, method, "/choices/states/").await;
	assert_eq!(response.status, status);
	if status == StatusCode::METHOD_NOT_ALLOWED {
		assert_eq!(response.headers.get("allow").unwrap(), "GET, HEAD");
	}
}

#[rstest]
#[tokio::test]
async fn test_misconfigured_endpoint_is_server_error() {
	let router = UrlRouter::new().route(
		"/choices/states/",
		Arc::new(ModelChoicesView::new(Arc::new(states()), InMemoryCache::new()).with_text_field("title")),
	);

	let response = call(&router, Method::GET, "/choices/states/").await;
	assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
	let body: Value = response.json().unwrap();
	assert!(body["detail"].as_str().unwrap().contains("title"));
}

#[rstest]
#[tokio::test]
async fn test_unrouted_path_is_not_found() {
	let router = UrlRouter::new();
	let response = call(&router, Method::GET, "/choices/nothing/").await;
	assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[serial]
#[tokio::test]
async fn test_ttl_from_layered_settings() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "[cache]\nchoices_ttl_secs = 120").unwrap();

	let settings = Settings::load(Some(file.path())).unwrap();
	assert_eq!(settings.cache.choices_ttl(), Duration::from_secs(120));

	// SAFETY: #[serial] gives this test exclusive access to the environment.
	unsafe { std::env::set_var("REMOTE_FORMS_CACHE__CHOICES_TTL_SECS", "30") };
	let overridden = Settings::load(Some(file.path()));
	unsafe { std::env::remove_var("REMOTE_FORMS_CACHE__CHOICES_TTL_SECS") };
	let settings = overridden.unwrap();

	let cache = Arc::new(InMemoryCache::new());
	let view = ModelChoicesView::new(Arc::new(states()), cache.clone()).with_settings(&settings.cache);
	assert_eq!(view.ttl(), Duration::from_secs(30));

	view.handle(Request::builder().uri("/").build().unwrap())
		.await
		.unwrap();
	let key = view.cache_key(&Default::default());
	assert!(cache.has_key(&key).await.unwrap());
}
