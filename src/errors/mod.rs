//! Unified error handling with consistent API response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error detail in the API response envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Consistent JSON envelope for all API responses.
///
/// `message` carries the short human-readable outcome of a write so the
/// presentation layer can show it as a notice.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            data: Some(data),
            error: None,
            message: None,
        })
    }

    /// Wrap a successful write together with its outcome message.
    pub fn done(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            data: Some(data),
            error: None,
            message: Some(message.into()),
        })
    }

    /// Wrap an error in the envelope.
    pub fn error(code: &str, message: &str) -> Json<Self> {
        Json(Self {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
            message: None,
        })
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient stock for '{item}': {available} available, {requested} requested")]
    InsufficientStock {
        item: String,
        available: i32,
        requested: i32,
    },

    #[error("Duplicate assignment: {0}")]
    DuplicateAssignment(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Acting staff member required")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Check if this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error is a rejected stock mutation.
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(self, Self::InsufficientStock { .. })
    }

    /// Check if this error is a rejected duplicate assignment.
    pub fn is_duplicate_assignment(&self) -> bool {
        matches!(self, Self::DuplicateAssignment(_))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Kind of integrity constraint a failed write tripped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Unique,
    ForeignKey,
    Check,
}

/// Classify a database error raised by an integrity constraint.
pub fn violation(err: &sqlx::Error) -> Option<Violation> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Some(Violation::Unique),
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            Some(Violation::ForeignKey)
        }
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => Some(Violation::Check),
        _ => None,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::InsufficientStock { .. } => {
                (StatusCode::CONFLICT, "INSUFFICIENT_STOCK", self.to_string())
            }
            AppError::DuplicateAssignment(msg) => {
                (StatusCode::CONFLICT, "DUPLICATE_ASSIGNMENT", msg.clone())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "An acting staff member is required for this operation".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "DATA_UNAVAILABLE",
                    "Data is temporarily unavailable".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()> {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message,
            }),
            message: None,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_response_success() {
        let response = ApiResponse::success("hello");
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["data"], "hello");
        assert!(json["error"].is_null());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn api_response_done_carries_message() {
        let response = ApiResponse::done(3, "Stock updated");
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["data"], 3);
        assert_eq!(json["message"], "Stock updated");
    }

    #[test]
    fn api_response_error() {
        let response = ApiResponse::<()>::error("NOT_FOUND", "Patient not found");
        let json = serde_json::to_value(&response.0).unwrap();
        assert!(json["data"].is_null());
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Patient not found");
    }

    #[test]
    fn insufficient_stock_message() {
        let err = AppError::InsufficientStock {
            item: "Gasas".to_string(),
            available: 2,
            requested: 5,
        };
        assert!(err.is_insufficient_stock());
        assert_eq!(
            err.to_string(),
            "Insufficient stock for 'Gasas': 2 available, 5 requested"
        );
    }

    #[test]
    fn guard_errors_map_to_conflict() {
        let resp = AppError::DuplicateAssignment("taken".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = AppError::InsufficientStock {
            item: "Jeringas".to_string(),
            available: 0,
            requested: 1,
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn database_error_is_data_unavailable() {
        let resp = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn app_error_from_sqlx() {
        let sqlx_err = sqlx::Error::RowNotFound;
        assert_eq!(violation(&sqlx_err), None);
        let err: AppError = sqlx_err.into();
        assert!(matches!(err, AppError::Database(_)));
        assert!(!err.is_not_found());
    }
}
