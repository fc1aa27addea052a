use bytes::Bytes;
use hyper::{HeaderMap, StatusCode};
use remote_forms_core::exception::{Error, Result};
use serde::Serialize;

/// HTTP Response representation
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new Response with the given status code
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	pub fn method_not_allowed() -> Self {
		Self::new(StatusCode::METHOD_NOT_ALLOWED)
	}

	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// Build an error response whose status follows [`Error::status_code`]
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_http::{Error, Response};
	/// use hyper::StatusCode;
	///
	/// let response = Response::from_error(&Error::NotFound("/nope/".into()));
	/// assert_eq!(response.status, StatusCode::NOT_FOUND);
	/// ```
	pub fn from_error(error: &Error) -> Self {
		let body = serde_json::json!({ "detail": error.to_string() });
		let response = Self::new(error.status_code());
		match response.clone().with_json(&body) {
			Ok(with_body) => with_body,
			Err(_) => response,
		}
	}

	/// Set the response body
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_http::Response;
	/// use bytes::Bytes;
	///
	/// let response = Response::ok().with_body("Hello, World!");
	/// assert_eq!(response.body, Bytes::from("Hello, World!"));
	/// ```
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Add a custom header to the response
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = hyper::header::HeaderName::from_bytes(name.as_bytes()) {
			if let Ok(header_value) = hyper::header::HeaderValue::from_str(value) {
				self.headers.insert(header_name, header_value);
			}
		}
		self
	}

	/// Set the response body to JSON and add the matching Content-Type header
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_http::Response;
	/// use serde_json::json;
	///
	/// let response = Response::ok().with_json(&json!([[1, "Books"]])).unwrap();
	/// assert_eq!(
	///     response.headers.get("content-type").unwrap().to_str().unwrap(),
	///     "application/json"
	/// );
	/// assert_eq!(&response.body[..], br#"[[1,"Books"]]"#);
	/// ```
	pub fn with_json<T: Serialize>(mut self, data: &T) -> Result<Self> {
		let json = serde_json::to_vec(data).map_err(|e| Error::Serialization(e.to_string()))?;
		self.body = Bytes::from(json);
		self.headers.insert(
			hyper::header::CONTENT_TYPE,
			hyper::header::HeaderValue::from_static("application/json"),
		);
		Ok(self)
	}

	/// Deserialize the body as JSON
	pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
		serde_json::from_slice(&self.body).map_err(|e| Error::Serialization(e.to_string()))
	}
}
