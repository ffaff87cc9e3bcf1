//! Common API types

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard response envelope.
///
/// On success: `{"success": true, "data": {...}}`,
/// on error: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload, `null` on error
    pub data: Option<T>,
    /// Error description, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Map a domain error to its HTTP representation.
///
/// Internal failures are logged and surfaced as a generic message; the
/// typed variants keep their text.
pub fn domain_error_response(err: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let (status, message) = match &err {
        DomainError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        DomainError::Conflict(_) => (StatusCode::CONFLICT, err.to_string()),
        DomainError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, err.to_string()),
        DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, err.to_string()),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::Database(_) | DomainError::Storage(_) | DomainError::Internal(_) => {
            error!(error = %err, "Request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_map_to_their_status() {
        let (status, _) = domain_error_response(DomainError::Validation("x".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = domain_error_response(DomainError::Conflict("x".into()));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = domain_error_response(DomainError::Forbidden("x".into()));
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = domain_error_response(DomainError::NotFound {
            entity: "Product",
            field: "id",
            value: "p1".into(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_hide_details() {
        let (status, body) = domain_error_response(DomainError::Internal("secret detail".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }
}
