//! A chained select resolved against the router that serves its options,
//! followed by a submission of one of those options

use remote_forms_cache::InMemoryCache;
use remote_forms_conf::WidgetSettings;
use remote_forms_forms::{
	ApiFieldsHandler, ClearDisabledFieldErrors, Form, FormField, FormPipeline, ModelChoiceField,
	RemoteChainedSelectWidget, RemoteSelectWidget, Widget,
};
use remote_forms_http::{Handler, Request};
use remote_forms_integration_tests::{cities, states};
use remote_forms_orm::QuerySet;
use remote_forms_urls::UrlRouter;
use remote_forms_views::{AllowedFilters, ModelChoicesView};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

#[fixture]
fn router() -> UrlRouter {
	UrlRouter::new()
		.route_named(
			"state-choices",
			"/choices/states/",
			Arc::new(ModelChoicesView::new(Arc::new(states()), InMemoryCache::new())),
		)
		.route_named(
			"city-choices",
			"/choices/cities/",
			Arc::new(
				ModelChoicesView::new(Arc::new(cities()), InMemoryCache::new())
					.with_allowed_filters(AllowedFilters::Only(vec!["state".into()])),
			),
		)
}

fn address_form() -> Form {
	let settings = WidgetSettings {
		default_empty_label: "Choose...".to_string(),
	};

	let state_widget = RemoteSelectWidget::builder()
		.url_name("state-choices")
		.with_settings(&settings)
		.build()
		.unwrap();
	let city_widget = RemoteChainedSelectWidget::builder("state")
		.url_name("city-choices")
		.url_param_field("state")
		.attr("class", "form-select")
		.with_settings(&settings)
		.empty_label(Some("Pick a city"))
		.build()
		.unwrap();

	let mut form = Form::with_prefix("addr");
	form.add_field(Box::new(
		ModelChoiceField::new("state", QuerySet::none_of(Arc::new(states())))
			.with_widget(Widget::from(state_widget)),
	));
	form.add_field(Box::new(
		ModelChoiceField::new("city", QuerySet::none_of(Arc::new(cities())))
			.with_widget(Widget::from(city_widget)),
	));
	form
}

#[rstest]
fn test_widget_attrs_resolve_through_router(router: UrlRouter) {
	let form = address_form();

	let state = form.get_field("state").unwrap().widget();
	let attrs = state.attrs(router.reverser()).unwrap();
	assert_eq!(attrs["data-url"], "/choices/states/");
	assert_eq!(attrs["data-empty-label"], "Choose...");

	let city = form.get_field("city").unwrap().widget();
	let attrs = city.attrs(router.reverser()).unwrap();
	assert_eq!(attrs["data-url"], "/choices/cities/");
	assert_eq!(attrs["data-empty-label"], "Pick a city");
	assert_eq!(attrs["data-parent-name"], "state");
	assert_eq!(attrs["data-url-param-field"], "state");
	assert_eq!(attrs["class"], "form-select remote-chained-in-django-form");
}

#[rstest]
fn test_unregistered_route_name_fails_at_render() {
	let form = address_form();
	let empty = UrlRouter::new();

	let widget = form.get_field("city").unwrap().widget();
	assert!(widget.is_remote());
	assert!(widget.attrs(empty.reverser()).is_err());
}

#[rstest]
#[tokio::test]
async fn test_option_from_endpoint_validates_on_submit(router: UrlRouter) {
	let form = address_form();
	let attrs = form
		.get_field("city")
		.unwrap()
		.widget()
		.attrs(router.reverser())
		.unwrap();

	// what the browser does when the parent select changes to Ceará
	let uri = format!("{}?{}=2", attrs["data-url"], attrs["data-url-param-field"]);
	let request = Request::builder().uri(uri).build().unwrap();
	let options: Vec<(Value, Value)> = router.handle(request).await.unwrap().json().unwrap();
	assert_eq!(options, vec![(json!(20), json!("Fortaleza"))]);

	let mut form = address_form();
	form.bind(HashMap::from([
		("addr-state".to_string(), json!("2")),
		("addr-city".to_string(), options[0].0.clone()),
	]));

	let pipeline = FormPipeline::new()
		.with_step(ApiFieldsHandler::new(["state", "city"]))
		.with_step(ClearDisabledFieldErrors);
	pipeline.prepare(&mut form);

	assert!(pipeline.is_valid(&mut form), "{:?}", form.errors());
	assert_eq!(form.cleaned_data()["city"]["name"], json!("Fortaleza"));
}
