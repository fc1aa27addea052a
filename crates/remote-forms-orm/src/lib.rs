//! Query layer for remote-forms
//!
//! A [`QuerySet`] is a lazily evaluated view over a [`Manager`], the backing
//! collection of a model. Choice fields hold querysets as their allowed-value
//! set and the choices endpoint projects them into `(value, label)` pairs.

pub mod error;
pub mod manager;
pub mod model;
pub mod query;

pub use error::{OrmError, OrmResult};
pub use manager::{InMemoryManager, Manager};
pub use model::{Model, ModelMeta, Record};
pub use query::{Filter, FilterValue, QuerySet};
