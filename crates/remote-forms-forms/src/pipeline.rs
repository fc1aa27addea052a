//! Steps run over a form around validation
//!
//! A [`FormPipeline`] runs each step's [`on_init`](FormStep::on_init) once
//! the form is built and bound, and each step's
//! [`after_clean`](FormStep::after_clean) once field errors are known.

mod api_fields;
mod disabled_errors;

pub use api_fields::ApiFieldsHandler;
pub use disabled_errors::ClearDisabledFieldErrors;

use crate::form::Form;

pub trait FormStep: Send + Sync {
	/// Adjust fields before validation
	fn on_init(&self, _form: &mut Form) {}

	/// Inspect or rewrite errors after the form has been cleaned
	fn after_clean(&self, _form: &mut Form) {}
}

/// Ordered list of [`FormStep`]s
#[derive(Default)]
pub struct FormPipeline {
	steps: Vec<Box<dyn FormStep>>,
}

impl FormPipeline {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_step<S: FormStep + 'static>(mut self, step: S) -> Self {
		self.steps.push(Box::new(step));
		self
	}

	pub fn len(&self) -> usize {
		self.steps.len()
	}

	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	/// Run every `on_init` in order
	///
	/// A step that changes a field through [`Form::get_field_mut`] discards
	/// any earlier cleaning result.
	pub fn prepare(&self, form: &mut Form) {
		for step in &self.steps {
			step.on_init(form);
		}
		form.mark_prepared();
	}

	/// Clean the form, let every step post-process the errors, then report
	/// whether the form is bound and error-free
	///
	/// A form bound after its last `prepare` (or never prepared) is prepared
	/// again first, so steps see the submitted data.
	pub fn is_valid(&self, form: &mut Form) -> bool {
		if !form.is_bound() {
			return false;
		}

		if !form.is_prepared() {
			self.prepare(form);
		}
		form.ensure_cleaned();
		for step in &self.steps {
			step.after_clean(form);
		}
		form.errors().is_empty()
	}
}
