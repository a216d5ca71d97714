use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use menu_core::MenuError;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the service layer.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Translation API error: {0}")]
    Translation(String),

    #[error("Image processing error: {0}")]
    Image(String),

    #[error(transparent)]
    Domain(#[from] MenuError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(err.to_string())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Storage(err.to_string())
    }
}

impl ServiceError {
    /// Message safe to hand back to a caller. Upstream failures stay generic.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Validation(_) | ServiceError::NotFound(_) | ServiceError::Domain(_) => {
                self.to_string()
            }
            ServiceError::Database(_) | ServiceError::Storage(_) => {
                "Internal storage failure, please retry later".to_string()
            }
            ServiceError::Translation(_) => "Translation service unavailable".to_string(),
            ServiceError::Image(_) => "Failed to process image".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let message = err.public_message();
        match err {
            ServiceError::Validation(_) => ApiError::BadRequest(message),
            ServiceError::NotFound(_) => ApiError::NotFound(message),
            ServiceError::Domain(MenuError::UnsupportedLanguage(_))
            | ServiceError::Domain(MenuError::ValidationError(_)) => ApiError::BadRequest(message),
            ServiceError::Domain(
                MenuError::MenuNotFound(_) | MenuError::CategoryNotFound(_) | MenuError::ItemNotFound(_),
            ) => ApiError::NotFound(message),
            ServiceError::Translation(detail) => {
                tracing::error!("Translation upstream failure: {}", detail);
                ApiError::Upstream(message)
            }
            other => {
                tracing::error!("Service failure: {}", other);
                ApiError::InternalError(message)
            }
        }
    }
}

impl From<MenuError> for ApiError {
    fn from(err: MenuError) -> Self {
        ServiceError::Domain(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "Unauthorized", msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            }
            ApiError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                (StatusCode::BAD_GATEWAY, "UpstreamError", msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_details_stay_private() {
        let err = ServiceError::Database("password authentication failed".into());
        assert!(!err.public_message().contains("password"));

        let api: ApiError = ServiceError::Translation("quota exceeded for key abc".into()).into();
        assert!(matches!(api, ApiError::Upstream(ref m) if !m.contains("abc")));
    }

    #[test]
    fn test_status_mapping() {
        let not_found: ApiError = ServiceError::NotFound("Item not found: x".into()).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let bad: ApiError = ServiceError::Domain(MenuError::UnsupportedLanguage("xx".into())).into();
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
