use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fhe::FheError;
use hackathon::{ErrorKind, HackathonError};
use serde::Serialize;

use crate::relay::RelayError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code, e.g. `VALIDATION_ERROR`, `CALLER_MISSING`
    /// or one of the contract codes such as `INCOMPLETE_SCORING`.
    pub code: &'static str,
    /// Human-readable error description.
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    CallerMissing,
    PermissionDenied(String),
    NotFound(String),
    /// Rejected by the contract.
    Contract(HackathonError),
    /// The encryption service did not answer in time.
    Unavailable(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::CallerMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "CALLER_MISSING",
                    message: "X-Wallet-Address header required".into(),
                },
            ),
            AppError::PermissionDenied(msg) => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "PERMISSION_DENIED",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Contract(err) => {
                let status = match err.kind() {
                    ErrorKind::Validation => StatusCode::BAD_REQUEST,
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::Authorization => StatusCode::FORBIDDEN,
                    ErrorKind::Timing | ErrorKind::State => StatusCode::CONFLICT,
                    ErrorKind::Proof => StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorKind::Internal => {
                        tracing::error!("Encryption service error: {}", err);
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (
                    status,
                    ErrorBody {
                        code: err.code(),
                        message: err.to_string(),
                    },
                )
            }
            AppError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody {
                    code: "DECRYPTION_UNAVAILABLE",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<HackathonError> for AppError {
    fn from(err: HackathonError) -> Self {
        AppError::Contract(err)
    }
}

impl From<FheError> for AppError {
    fn from(err: FheError) -> Self {
        match err {
            FheError::ValueOutOfRange { .. }
            | FheError::MalformedHandle(_)
            | FheError::MalformedEncoding(_)
            | FheError::UnknownHandle(_)
            | FheError::NotPubliclyDecryptable(_) => AppError::Validation(err.to_string()),
            FheError::AccessDenied { .. } => AppError::PermissionDenied(err.to_string()),
            FheError::Unavailable(msg) => AppError::Unavailable(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Contract(e) => AppError::Contract(e),
            RelayError::Exhausted(e) => {
                tracing::warn!(attempts = e.history.len(), "Public decryption gave up");
                AppError::Unavailable(e.to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
