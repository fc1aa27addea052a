use remote_forms_core::exception::Error;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrmError {
	#[error("Cannot resolve keyword '{field}' into field of model {model}")]
	UnknownField { model: String, field: String },

	#[error("Serialization error: {0}")]
	Serialization(String),

	#[error("Backend error: {0}")]
	Backend(String),
}

pub type OrmResult<T> = Result<T, OrmError>;

impl From<OrmError> for Error {
	fn from(err: OrmError) -> Self {
		match err {
			OrmError::UnknownField { .. } => Error::ImproperlyConfigured(err.to_string()),
			OrmError::Serialization(msg) => Error::Serialization(msg),
			OrmError::Backend(msg) => Error::Database(msg),
		}
	}
}
