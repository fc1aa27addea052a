//! Form processing for remote-forms
//!
//! This crate provides:
//! - a minimal [`Form`] with prefixes, initial values and an associated
//!   instance
//! - [`ModelChoiceField`] backed by a lazily evaluated queryset
//! - [`RemoteSelectWidget`] and [`RemoteChainedSelectWidget`], selects whose
//!   options are loaded from a URL
//! - a [`FormPipeline`] of [`FormStep`]s, with [`ApiFieldsHandler`] and
//!   [`ClearDisabledFieldErrors`]
//!
//! ```
//! use remote_forms_forms::{ApiFieldsHandler, ClearDisabledFieldErrors, Form, FormPipeline, ModelChoiceField};
//! use remote_forms_orm::{InMemoryManager, ModelMeta, QuerySet};
//! use serde_json::json;
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! let cities = InMemoryManager::new(ModelMeta::new("City", "id", ["id", "name"]))
//!     .with_json(json!([{"id": 1, "name": "Salvador"}, {"id": 2, "name": "Recife"}]))
//!     .unwrap();
//!
//! let mut form = Form::with_prefix("addr");
//! form.add_field(Box::new(ModelChoiceField::new("city", QuerySet::none_of(Arc::new(cities)))));
//! form.bind(HashMap::from([("addr-city".to_string(), json!("2"))]));
//!
//! let pipeline = FormPipeline::new()
//!     .with_step(ApiFieldsHandler::new(["city"]))
//!     .with_step(ClearDisabledFieldErrors);
//! pipeline.prepare(&mut form);
//!
//! assert!(pipeline.is_valid(&mut form));
//! assert_eq!(form.cleaned_data()["city"]["name"], json!("Recife"));
//! ```

pub mod field;
pub mod fields;
pub mod form;
pub mod pipeline;
pub mod widgets;

pub use field::{FieldError, FieldResult, FormField, QuerysetField};
pub use fields::{CharField, ChoiceField, ModelChoiceField};
pub use form::{ALL_FIELDS_KEY, Form, FormError, FormResult};
pub use pipeline::{ApiFieldsHandler, ClearDisabledFieldErrors, FormPipeline, FormStep};
pub use widgets::{
	DEFAULT_EMPTY_LABEL, RemoteChainedSelectWidget, RemoteChainedSelectWidgetBuilder,
	RemoteSelectWidget, RemoteSelectWidgetBuilder, Widget, WidgetError,
};
