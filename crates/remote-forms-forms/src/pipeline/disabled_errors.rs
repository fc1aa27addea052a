use super::FormStep;
use crate::form::Form;

/// Drops every error recorded for a disabled field
///
/// Disabled inputs are not user-editable, so their errors can only come from
/// stale or missing data. Form-level errors are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearDisabledFieldErrors;

impl FormStep for ClearDisabledFieldErrors {
	fn after_clean(&self, form: &mut Form) {
		let disabled: Vec<String> = form
			.fields()
			.iter()
			.filter(|field| field.disabled())
			.map(|field| field.name().to_string())
			.collect();

		for name in disabled {
			if let Some(errors) = form.remove_errors(&name) {
				tracing::debug!(field = %name, dropped = errors.len(), "cleared errors on disabled field");
			}
		}
	}
}
