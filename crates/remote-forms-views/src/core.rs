use async_trait::async_trait;
use remote_forms_core::exception::{Error, Result};
use remote_forms_http::{Request, Response};

/// A request handler that knows which methods it answers
#[async_trait]
pub trait View: Send + Sync {
	async fn dispatch(&self, request: Request) -> Result<Response>;

	/// Returns the list of HTTP methods allowed by this view
	fn allowed_methods(&self) -> Vec<&'static str> {
		vec!["GET", "HEAD"]
	}

	/// Dispatch, answering a refused method with a 405 that lists the
	/// methods this view does accept in its `Allow` header
	async fn respond(&self, request: Request) -> Result<Response> {
		match self.dispatch(request).await {
			Err(err @ Error::MethodNotAllowed(_)) => {
				Ok(Response::from_error(&err).with_header("Allow", &self.allowed_methods().join(", ")))
			}
			other => other,
		}
	}
}
