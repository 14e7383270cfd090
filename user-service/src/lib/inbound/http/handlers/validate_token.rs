use axum::extract::Path;
use axum::extract::State;

use super::ApiEnvelope;
use super::ApiError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::BearerToken;
use crate::inbound::http::router::AppState;

pub async fn validate_token<US: UserServicePort>(
    State(state): State<AppState<US>>,
    Path(id): Path<String>,
    BearerToken(token): BearerToken,
) -> Result<ApiEnvelope, ApiError> {
    tracing::debug!(user_id = %id, "Validating token for user");

    let valid = UserId::from_string(&id)
        .map(|user_id| state.user_service.validate_token(Some(&user_id), &token))
        .unwrap_or(false);

    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid or expired token".to_string(),
        ));
    }

    ApiEnvelope::accepted(state.user_service.as_ref(), &valid.to_string())
}
