use super::FormStep;
use crate::field::is_empty_value;
use crate::form::Form;
use remote_forms_orm::{FilterValue, ModelMeta};
use serde_json::Value;

/// Restricts API-governed choice fields to the single row that matters
///
/// For each named field exposing a queryset:
///
/// - unbound form: the initial value (from `initial`, else the associated
///   instance) narrows the queryset to that primary key, so the current
///   value can render;
/// - bound form: the submitted value narrows it to that primary key, so a
///   value confirmed by the remote source validates while anything else is
///   rejected.
///
/// With no value the queryset is left as declared, typically `none()`.
///
/// # Examples
///
/// ```
/// use remote_forms_forms::{ApiFieldsHandler, Form, FormField, FormStep, ModelChoiceField};
/// use remote_forms_orm::{InMemoryManager, ModelMeta, QuerySet};
/// use serde_json::json;
/// use std::collections::HashMap;
/// use std::sync::Arc;
///
/// let states = InMemoryManager::new(ModelMeta::new("State", "id", ["id", "name"]))
///     .with_json(json!([{"id": 1, "name": "Bahia"}, {"id": 2, "name": "Ceará"}]))
///     .unwrap();
///
/// let mut form = Form::with_initial(HashMap::from([("state".to_string(), json!(2))]));
/// form.add_field(Box::new(ModelChoiceField::new("state", QuerySet::none_of(Arc::new(states)))));
///
/// ApiFieldsHandler::new(["state"]).on_init(&mut form);
///
/// let field = form.get_field("state").unwrap().as_queryset_field().unwrap();
/// assert_eq!(field.queryset().values_list("pk", "name").unwrap(), vec![(json!(2), json!("Ceará"))]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApiFieldsHandler {
	api_fields: Vec<String>,
}

impl ApiFieldsHandler {
	pub fn new<I, S>(api_fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			api_fields: api_fields.into_iter().map(Into::into).collect(),
		}
	}

	pub fn api_fields(&self) -> &[String] {
		&self.api_fields
	}

	fn restrict(form: &mut Form, name: &str, value: Option<Value>) {
		let Some(value) = value else {
			tracing::debug!(field = %name, "no value, queryset left unchanged");
			return;
		};
		if form.get_field(name).and_then(|f| f.as_queryset_field()).is_none() {
			tracing::debug!(field = %name, "api field missing or without queryset, skipping");
			return;
		}
		let Some(field) = form.get_field_mut(name).and_then(|f| f.as_queryset_field_mut()) else {
			return;
		};

		let queryset = field.queryset();
		let identifier = related_pk(queryset.meta(), &value);
		tracing::debug!(
			field = %name,
			model = %queryset.meta().name,
			pk = %identifier,
			"restricting api field queryset"
		);
		let restricted = queryset.model().filter_pk(identifier);
		field.set_queryset(restricted);
	}

	fn initial_value(form: &Form, name: &str) -> Option<Value> {
		form.initial()
			.get(name)
			.filter(|v| !v.is_null())
			.or_else(|| form.instance().and_then(|instance| instance.get(name)))
			.filter(|v| !v.is_null())
			.cloned()
	}

	fn submitted_value(form: &Form, name: &str) -> Option<Value> {
		form.data()
			.get(&form.add_prefix(name))
			.filter(|v| !is_empty_value(Some(*v)))
			.cloned()
	}
}

/// A related row stands for its primary key; anything else is the key itself
fn related_pk(meta: &ModelMeta, value: &Value) -> FilterValue {
	match value {
		Value::Object(row) => match row.get(&meta.pk_field) {
			Some(pk) => FilterValue::from(pk),
			None => FilterValue::from(value),
		},
		other => FilterValue::from(other),
	}
}

impl FormStep for ApiFieldsHandler {
	fn on_init(&self, form: &mut Form) {
		for name in &self.api_fields {
			let value = if form.is_bound() {
				Self::submitted_value(form, name)
			} else {
				Self::initial_value(form, name)
			};
			Self::restrict(form, name, value);
		}
	}
}
