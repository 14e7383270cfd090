use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::UserData;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::BearerToken;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        // Validation happens here - errors are automatically converted via #[from]
        let username = self.username.map(Username::new).transpose()?;

        Ok(UpdateUserCommand {
            full_name: self.full_name,
            username,
            password: self.password,
        })
    }
}

pub async fn update_user<US: UserServicePort>(
    State(state): State<AppState<US>>,
    Path(id): Path<String>,
    BearerToken(token): BearerToken,
    Json(req): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    tracing::debug!(user_id = %id, "Updating user");

    // A token only authorizes changes to its own user
    let user_id = UserId::from_string(&id)
        .ok()
        .filter(|user_id| state.user_service.validate_token(Some(user_id), &token))
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::ACCEPTED, user.into()))
}
