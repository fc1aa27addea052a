//! Serving remote-forms handlers over HTTP/1
//!
//! ```no_run
//! use remote_forms_conf::Settings;
//! use remote_forms_server::{HttpServer, logging};
//! use remote_forms_urls::UrlRouter;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load(None)?;
//! logging::init(&settings.logging)?;
//!
//! let router = UrlRouter::new();
//! HttpServer::from_settings(Arc::new(router), &settings.server)?
//!     .run()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod logging;

pub use http::{HttpServer, ServerError, serve};
pub use logging::LoggingError;
