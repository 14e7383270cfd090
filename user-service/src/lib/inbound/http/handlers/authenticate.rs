use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiEnvelope;
use super::ApiError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Exchange a user's password for an access token.
pub async fn authenticate<US: UserServicePort>(
    State(state): State<AppState<US>>,
    Path(id): Path<String>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiEnvelope, ApiError> {
    tracing::debug!(user_id = %id, "Getting token for user");

    let user_id = UserId::from_string(&id)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let access_token = state
        .user_service
        .authenticate(&user_id, &body.password)
        .await?;

    ApiEnvelope::accepted(state.user_service.as_ref(), &access_token)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    password: String,
}
