use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::{backends::github::NormalizeError, store::StoreError};

#[derive(Debug, Error)]
pub enum ErrorCode {
    InvalidSignature,
    MalformedEventBody(#[from] serde_json::Error),
    MissingEventBodyField(String),
    MalformedEventBodyField(String, String),
    StorageError(#[from] StoreError),
    UnhandledError(String),
}

#[derive(Serialize)]
pub struct ErrorCodeDetail {
    #[serde(skip)]
    status_code: StatusCode,
    internal_code: u32,
    message: String,
}

impl ErrorCode {
    pub fn details(&self) -> ErrorCodeDetail {
        self.into()
    }
}

impl ErrorCodeDetail {
    pub fn with_status_code<T: Into<String>>(
        status_code: StatusCode,
        internal_code: u32,
        message: T,
    ) -> Self {
        Self {
            internal_code,
            status_code,
            message: message.into(),
        }
    }

    pub fn bad_request<T: Into<String>>(internal_code: u32, message: T) -> Self {
        Self::with_status_code(StatusCode::BAD_REQUEST, internal_code, message)
    }

    pub fn server_error<T: Into<String>>(internal_code: u32, message: T) -> Self {
        Self::with_status_code(StatusCode::INTERNAL_SERVER_ERROR, internal_code, message)
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn internal_code(&self) -> u32 {
        self.internal_code
    }
}

impl From<&ErrorCode> for ErrorCodeDetail {
    fn from(value: &ErrorCode) -> Self {
        match value {
            ErrorCode::InvalidSignature => {
                Self::bad_request(1, "Invalid X-Hub-Signature-256 signature")
            }
            ErrorCode::MalformedEventBody(e) => {
                Self::bad_request(2, format!("Malformed event body: '{}'", e))
            }
            ErrorCode::MissingEventBodyField(field) => {
                Self::bad_request(3, format!("Missing event body field '{}'", field))
            }
            ErrorCode::MalformedEventBodyField(field, e) => Self::bad_request(
                4,
                format!("Malformed event body field '{}': '{}'", field, e),
            ),
            ErrorCode::StorageError(e) => Self::server_error(5, e.to_string()),
            ErrorCode::UnhandledError(e) => {
                Self::server_error(99, format!("Unhandled error: '{}'", e))
            }
        }
    }
}

impl From<NormalizeError> for ErrorCode {
    fn from(value: NormalizeError) -> Self {
        match value {
            NormalizeError::MissingField(field) => Self::MissingEventBodyField(field.into()),
            NormalizeError::MalformedField(field, e) => {
                Self::MalformedEventBodyField(field.into(), e)
            }
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let detail = ErrorCodeDetail::from(self);
        f.write_str(&detail.message)
    }
}

impl IntoResponse for ErrorCode {
    fn into_response(self) -> Response {
        let details = self.details();
        if details.status_code().is_server_error() {
            tracing::error!(internal_code = details.internal_code(), message = %details.message);
        }

        (details.status_code(), Json(details)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    use crate::{backends::github::NormalizeError, store::StoreError};

    use super::ErrorCode;

    #[test]
    fn test_normalize_error_conversion() {
        let err: ErrorCode = NormalizeError::MissingField("head_commit.timestamp").into();
        let details = err.details();
        assert_eq!(details.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(details.internal_code(), 3);
        assert_eq!(
            err.to_string(),
            "Missing event body field 'head_commit.timestamp'"
        );
    }

    #[test]
    fn test_storage_error_is_server_error() {
        let err: ErrorCode = StoreError::backend("insert", "disk full").into();
        let details = err.details();
        assert_eq!(details.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(details.internal_code(), 5);
        assert_eq!(err.to_string(), "Storage error during 'insert': disk full");
    }
}
