//! Core types for remote-forms
//!
//! Holds the exception type every other crate converts its own errors into
//! when they cross an HTTP or configuration boundary.

pub mod exception;

pub use exception::{Error, Result};
