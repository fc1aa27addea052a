//! Framework-wide error type

use hyper::StatusCode;

/// Errors surfaced by views, handlers and configuration loading
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("HTTP error: {0}")]
	Http(String),

	#[error("Validation error: {0}")]
	Validation(String),

	/// Developer-facing misconfiguration, raised at construction time
	#[error("Improperly configured: {0}")]
	ImproperlyConfigured(String),

	#[error("Database error: {0}")]
	Database(String),

	#[error("Serialization error: {0}")]
	Serialization(String),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Method not allowed: {0}")]
	MethodNotAllowed(String),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl Error {
	/// HTTP status code a handler should answer with for this error
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_core::Error;
	/// use hyper::StatusCode;
	///
	/// let err = Error::NotFound("/missing/".to_string());
	/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
	///
	/// let err = Error::ImproperlyConfigured("no url".to_string());
	/// assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
	/// ```
	pub fn status_code(&self) -> StatusCode {
		match self {
			Error::Http(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
			Error::NotFound(_) => StatusCode::NOT_FOUND,
			Error::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
			Error::ImproperlyConfigured(_)
			| Error::Database(_)
			| Error::Serialization(_)
			| Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Serialization(err.to_string())
	}
}

pub type Result<T> = std::result::Result<T, Error>;
