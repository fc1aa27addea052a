//! Caching for remote-forms
//!
//! The [`Cache`] trait is the injected key/value collaborator the choices
//! endpoint stores its `(value, label)` pairs in. [`InMemoryCache`] is the
//! process-local backend used by default and in tests.

mod cache_trait;
mod entry;
mod in_memory;
pub mod key;

pub use cache_trait::Cache;
pub use in_memory::InMemoryCache;
pub use key::{choices_cache_key, filter_signature};
