//! Views for remote-forms
//!
//! [`ModelChoicesView`] serves the `(value, label)` pairs a remote select
//! widget loads, filtered by query parameters and cached per filter set.

pub mod core;
pub mod model_choices;

pub use crate::core::View;
pub use model_choices::{AllowedFilters, ChoiceRow, DEFAULT_CHOICES_TTL, ModelChoicesView};
