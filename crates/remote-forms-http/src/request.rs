//! HTTP request representation

mod params;

use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri, Version};
use remote_forms_core::exception::{Error, Result};
use std::collections::HashMap;

/// HTTP Request representation
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	/// Percent-decoded query string parameters. A repeated key keeps its last value.
	pub query_params: HashMap<String, String>,
}

impl Request {
	/// Create a new request from its raw parts
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_http::Request;
	/// use hyper::{HeaderMap, Method, Uri, Version};
	/// use bytes::Bytes;
	///
	/// let uri: Uri = "/api/categories/?parent=2".parse().unwrap();
	/// let request = Request::new(Method::GET, uri, Version::HTTP_11, HeaderMap::new(), Bytes::new());
	/// assert_eq!(request.query_params.get("parent"), Some(&"2".to_string()));
	/// ```
	pub fn new(method: Method, uri: Uri, version: Version, headers: HeaderMap, body: Bytes) -> Self {
		let query_params = Self::parse_query_params(&uri);
		Self {
			method,
			uri,
			version,
			headers,
			body,
			query_params,
		}
	}

	/// Start building a request
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}
}

/// Builder for [`Request`]
#[derive(Debug, Default)]
pub struct RequestBuilder {
	method: Option<Method>,
	uri: Option<String>,
	version: Option<Version>,
	headers: HeaderMap,
	body: Bytes,
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());
		self
	}

	pub fn version(mut self, version: Version) -> Self {
		self.version = Some(version);
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Build the request
	///
	/// # Errors
	///
	/// Returns [`Error::Http`] if the URI cannot be parsed.
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/api/cities/?state=SP")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.path(), "/api/cities/");
	/// assert_eq!(request.query_params.get("state"), Some(&"SP".to_string()));
	/// ```
	pub fn build(self) -> Result<Request> {
		let uri = self
			.uri
			.as_deref()
			.unwrap_or("/")
			.parse::<Uri>()
			.map_err(|e| Error::Http(format!("invalid uri: {}", e)))?;

		Ok(Request::new(
			self.method.unwrap_or(Method::GET),
			uri,
			self.version.unwrap_or(Version::HTTP_11),
			self.headers,
			self.body,
		))
	}
}
