//! Binder and disabled-field filter working on one address form

use remote_forms_forms::{
	ApiFieldsHandler, CharField, ClearDisabledFieldErrors, Form, FormField, FormPipeline,
	ModelChoiceField,
};
use remote_forms_integration_tests::{cities, states};
use remote_forms_orm::{QuerySet, Record};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

#[fixture]
fn pipeline() -> FormPipeline {
	FormPipeline::new()
		.with_step(ApiFieldsHandler::new(["state", "city"]))
		.with_step(ClearDisabledFieldErrors)
}

fn address_form(prefix: &str) -> Form {
	let mut form = Form::with_prefix(prefix);
	form.add_field(Box::new(CharField::new("street").required()));
	form.add_field(Box::new(ModelChoiceField::new(
		"state",
		QuerySet::none_of(Arc::new(states())),
	)));
	form.add_field(Box::new(ModelChoiceField::new(
		"city",
		QuerySet::none_of(Arc::new(cities())),
	)));
	form
}

fn allowed_pks(form: &Form, name: &str) -> Vec<Value> {
	form.get_field(name)
		.and_then(|f| f.as_queryset_field())
		.map(|f| f.queryset().pks().unwrap())
		.unwrap_or_default()
}

fn data(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
	pairs
		.iter()
		.map(|(k, v)| (k.to_string(), v.clone()))
		.collect()
}

#[rstest]
fn test_edit_form_renders_instance_values(pipeline: FormPipeline) {
	let instance: Record =
		serde_json::from_value(json!({"street": "Rua Chile", "state": 1, "city": 10})).unwrap();
	let mut form = address_form("shipping").with_instance(instance);

	pipeline.prepare(&mut form);

	assert_eq!(allowed_pks(&form, "state"), vec![json!(1)]);
	assert_eq!(allowed_pks(&form, "city"), vec![json!(10)]);
}

#[rstest]
fn test_new_form_offers_nothing(pipeline: FormPipeline) {
	let mut form = address_form("shipping");
	pipeline.prepare(&mut form);

	assert!(allowed_pks(&form, "state").is_empty());
	assert!(allowed_pks(&form, "city").is_empty());
	assert!(!pipeline.is_valid(&mut form));
}

#[rstest]
fn test_submitted_remote_values_validate(pipeline: FormPipeline) {
	let mut form = address_form("shipping");
	form.bind(data(&[
		("shipping-street", json!("Av. Boa Viagem")),
		("shipping-state", json!("3")),
		("shipping-city", json!("31")),
	]));

	pipeline.prepare(&mut form);

	assert!(pipeline.is_valid(&mut form), "{:?}", form.errors());
	assert_eq!(form.cleaned_data()["city"]["name"], json!("Olinda"));
	assert_eq!(form.cleaned_data()["state"]["code"], json!("PE"));
}

#[rstest]
fn test_unprefixed_submission_is_ignored(pipeline: FormPipeline) {
	let mut form = address_form("shipping");
	form.bind(data(&[
		("street", json!("Av. Boa Viagem")),
		("state", json!("3")),
		("city", json!("31")),
	]));

	pipeline.prepare(&mut form);

	assert!(allowed_pks(&form, "city").is_empty());
	assert!(!pipeline.is_valid(&mut form));
}

#[rstest]
fn test_unknown_remote_value_is_rejected(pipeline: FormPipeline) {
	let mut form = address_form("shipping");
	form.bind(data(&[
		("shipping-street", json!("Av. Boa Viagem")),
		("shipping-state", json!("3")),
		("shipping-city", json!("999")),
	]));

	pipeline.prepare(&mut form);

	assert!(!pipeline.is_valid(&mut form));
	assert_eq!(form.errors()["city"], vec!["Select a valid choice.".to_string()]);
	assert!(!form.errors().contains_key("state"));
}

#[rstest]
fn test_disabled_field_never_blocks_submission(pipeline: FormPipeline) {
	let mut form = Form::with_prefix("shipping");
	form.add_field(Box::new(CharField::new("street").required()));
	form.add_field(Box::new(
		ModelChoiceField::new("city", QuerySet::none_of(Arc::new(cities()))).disabled(true),
	));
	form.bind(data(&[
		("shipping-street", json!("Rua Chile")),
		("shipping-city", json!("10")),
	]));

	pipeline.prepare(&mut form);
	form.add_error(Some("city"), "Not editable").unwrap();
	assert!(form.errors().contains_key("city"));

	assert!(pipeline.is_valid(&mut form));
	assert!(!form.errors().contains_key("city"));
}

#[rstest]
fn test_disabled_filter_keeps_enabled_errors(pipeline: FormPipeline) {
	let mut form = Form::with_prefix("shipping");
	form.add_field(Box::new(CharField::new("street").required()));
	form.add_field(Box::new(
		ModelChoiceField::new("city", QuerySet::none_of(Arc::new(cities()))).disabled(true),
	));
	form.bind(HashMap::new());

	pipeline.prepare(&mut form);

	assert!(!pipeline.is_valid(&mut form));
	assert!(form.errors().contains_key("street"));
	assert!(!form.errors().contains_key("city"));
	assert!(form.get_field("city").unwrap().disabled());
}
