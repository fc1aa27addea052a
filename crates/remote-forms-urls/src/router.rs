//! Exact-path request routing

use crate::reverse::UrlReverser;
use async_trait::async_trait;
use remote_forms_core::exception::{Error, Result};
use remote_forms_http::{Handler, Request, Response};
use std::collections::HashMap;
use std::sync::Arc;

/// Dispatches requests to handlers registered for an exact path
///
/// Named routes are also registered in the router's [`UrlReverser`], which
/// widgets use to resolve their `url_name`.
///
/// # Examples
///
/// ```
/// use remote_forms_urls::UrlRouter;
/// use remote_forms_http::{Handler, Request, Response, Result};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct Pong;
///
/// #[async_trait]
/// impl Handler for Pong {
///     async fn handle(&self, _request: Request) -> Result<Response> {
///         Ok(Response::ok().with_body("pong"))
///     }
/// }
///
/// let router = UrlRouter::new().route_named("ping", "/ping/", Arc::new(Pong));
/// assert_eq!(router.reverser().reverse("ping").unwrap(), "/ping/");
/// ```
#[derive(Clone, Default)]
pub struct UrlRouter {
	routes: HashMap<String, Arc<dyn Handler>>,
	reverser: UrlReverser,
}

impl UrlRouter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn route(mut self, path: &str, handler: Arc<dyn Handler>) -> Self {
		self.routes.insert(path.to_string(), handler);
		self
	}

	pub fn route_named(mut self, name: &str, path: &str, handler: Arc<dyn Handler>) -> Self {
		self.reverser.register_path(name, path);
		self.route(path, handler)
	}

	pub fn reverser(&self) -> &UrlReverser {
		&self.reverser
	}
}

#[async_trait]
impl Handler for UrlRouter {
	async fn handle(&self, request: Request) -> Result<Response> {
		let path = request.path().to_string();

		match self.routes.get(&path) {
			Some(handler) => handler.handle(request).await,
			None => {
				tracing::debug!(%path, "no route matched");
				Err(Error::NotFound(format!("No route found for {}", path)))
			}
		}
	}
}
