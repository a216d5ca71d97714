use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use crate::state::AppState;
use crate::utils::error::ApiError;

/// Caller identity taken from an `Authorization: Bearer <jwt>` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub editor_id: String,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

        let claims = state.jwt.validate_token(token.trim()).map_err(|e| {
            debug!("Token rejected: {}", e);
            ApiError::Unauthorized("Invalid or expired token".to_string())
        })?;

        Ok(Self {
            editor_id: claims.sub,
        })
    }
}
