//! The same address form, wired only through the `remote_forms` facade

use remote_forms::prelude::*;
use remote_forms_integration_tests::{cities, states};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

fn router() -> UrlRouter {
	UrlRouter::new().route_named(
		"city-choices",
		"/choices/cities/",
		Arc::new(
			ModelChoicesView::new(Arc::new(cities()), InMemoryCache::new())
				.with_allowed_filters(AllowedFilters::Only(vec!["state".into()])),
		),
	)
}

fn address_form() -> Form {
	let widget = RemoteChainedSelectWidget::builder("state")
		.url_name("city-choices")
		.url_param_field("state")
		.build()
		.unwrap();

	let mut form = Form::new();
	form.add_field(Box::new(ModelChoiceField::new(
		"state",
		QuerySet::new(Arc::new(states())),
	)));
	form.add_field(Box::new(
		ModelChoiceField::new("city", QuerySet::none_of(Arc::new(cities())))
			.with_widget(Widget::from(widget)),
	));
	form
}

#[tokio::test]
async fn test_prelude_covers_render_fetch_and_validate() {
	let router = router();
	let attrs = address_form()
		.get_field("city")
		.unwrap()
		.widget()
		.attrs(router.reverser())
		.unwrap();
	assert_eq!(attrs["class"], "remote-chained-in-django-form");

	let uri = format!("{}?state=1", attrs["data-url"]);
	let request = Request::builder().uri(uri).build().unwrap();
	let options: Vec<(Value, Value)> = router.handle(request).await.unwrap().json().unwrap();
	assert_eq!(options.len(), 2);

	let pipeline = FormPipeline::new().with_step(ApiFieldsHandler::new(["city"]));

	let mut form = address_form();
	form.bind(HashMap::from([
		("state".to_string(), json!("1")),
		("city".to_string(), options[1].0.clone()),
	]));
	assert!(pipeline.is_valid(&mut form), "{:?}", form.errors());
	assert_eq!(form.cleaned_data()["city"]["name"], json!("Feira de Santana"));

	let mut form = address_form();
	form.bind(HashMap::from([
		("state".to_string(), json!("1")),
		("city".to_string(), json!("999")),
	]));
	assert!(!pipeline.is_valid(&mut form));
	assert!(form.errors().contains_key("city"));
}
