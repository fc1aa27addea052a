use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use remote_forms_conf::ServerSettings;
use remote_forms_http::{Handler, Request, Response};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("Invalid bind address '{0}'")]
	InvalidAddress(String),
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Connection error: {0}")]
	Connection(#[from] hyper::Error),
}

/// HTTP/1 server driving a single [`Handler`]
///
/// Every accepted connection is served on its own tokio task. Errors returned
/// by the handler are turned into responses with
/// [`Response::from_error`], so a misconfigured endpoint answers `500` while
/// an unknown path answers `404`.
pub struct HttpServer {
	handler: Arc<dyn Handler>,
	addr: Option<SocketAddr>,
}

impl HttpServer {
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use remote_forms_server::HttpServer;
	/// use remote_forms_http::{Handler, Request, Response};
	///
	/// struct Hello;
	///
	/// #[async_trait::async_trait]
	/// impl Handler for Hello {
	///     async fn handle(&self, _req: Request) -> remote_forms_http::Result<Response> {
	///         Ok(Response::ok().with_body("Hello"))
	///     }
	/// }
	///
	/// let server = HttpServer::new(Arc::new(Hello));
	/// assert!(server.addr().is_none());
	/// ```
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			handler,
			addr: None,
		}
	}

	/// Server bound to the address configured in `[server]`
	pub fn from_settings(
		handler: Arc<dyn Handler>,
		settings: &ServerSettings,
	) -> Result<Self, ServerError> {
		let addr = settings
			.bind
			.parse::<SocketAddr>()
			.map_err(|_| ServerError::InvalidAddress(settings.bind.clone()))?;
		Ok(Self {
			handler,
			addr: Some(addr),
		})
	}

	pub fn addr(&self) -> Option<SocketAddr> {
		self.addr
	}

	/// Listen on the configured address
	pub async fn run(self) -> Result<(), ServerError> {
		let addr = self
			.addr
			.ok_or_else(|| ServerError::InvalidAddress("<unset>".to_string()))?;
		self.listen(addr).await
	}

	/// Bind `addr` and serve until accepting fails
	pub async fn listen(self, addr: SocketAddr) -> Result<(), ServerError> {
		let listener = TcpListener::bind(addr).await?;
		self.serve(listener).await
	}

	/// Serve connections from an already bound listener
	pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
		tracing::info!(addr = %listener.local_addr()?, "server listening");

		loop {
			let (stream, remote_addr) = listener.accept().await?;
			let handler = self.handler.clone();

			tokio::task::spawn(async move {
				if let Err(err) = Self::handle_connection(stream, handler).await {
					tracing::warn!(%remote_addr, error = %err, "connection error");
				}
			});
		}
	}

	pub async fn handle_connection(
		stream: TcpStream,
		handler: Arc<dyn Handler>,
	) -> Result<(), ServerError> {
		let io = TokioIo::new(stream);
		http1::Builder::new()
			.serve_connection(io, RequestService { handler })
			.await?;
		Ok(())
	}
}

struct RequestService {
	handler: Arc<dyn Handler>,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = Box<dyn std::error::Error + Send + Sync>;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = self.handler.clone();

		Box::pin(async move {
			let (parts, body) = req.into_parts();
			let body = body.collect().await?.to_bytes();

			let request = Request::new(parts.method, parts.uri, parts.version, parts.headers, body);
			let method = request.method.clone();
			let path = request.path().to_string();

			let response = match handler.handle(request).await {
				Ok(response) => response,
				Err(err) => {
					tracing::debug!(%method, %path, error = %err, "handler failed");
					Response::from_error(&err)
				}
			};

			let mut builder = hyper::Response::builder().status(response.status);
			for (name, value) in response.headers.iter() {
				builder = builder.header(name, value);
			}

			Ok(builder.body(Full::new(response.body))?)
		})
	}
}

/// Serve `handler` on `addr`
pub async fn serve(addr: SocketAddr, handler: Arc<dyn Handler>) -> Result<(), ServerError> {
	HttpServer::new(handler).listen(addr).await
}
