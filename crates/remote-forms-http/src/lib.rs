//! HTTP primitives for remote-forms
//!
//! A deliberately small request/response pair plus the [`Handler`] trait that
//! views, routers and the server agree on.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::Handler;
pub use remote_forms_core::exception::{Error, Result};
pub use request::{Request, RequestBuilder};
pub use response::Response;
