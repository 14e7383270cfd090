use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserServicePort;

/// Access token taken from the `Authorization` header.
///
/// Accepts the raw token or `Bearer <token>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_token_from_header(&parts.headers).map(|token| BearerToken(token.to_string()))
    }
}

/// Middleware that rejects requests without a valid token for any user
pub async fn authenticate<US: UserServicePort>(
    State(state): State<AppState<US>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(req.headers())?;

    // No per-user permissions: any live token grants access
    if !state.user_service.validate_token(None, token) {
        tracing::warn!(uri = %req.uri(), "Token validation failed");
        return Err(ApiError::Unauthorized(
            "Invalid or expired token".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

fn extract_token_from_header(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
    if token.is_empty() {
        return Err(ApiError::Unauthorized(
            "Empty Authorization header".to_string(),
        ));
    }

    Ok(token)
}
