use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_users<US: UserServicePort>(
    State(state): State<AppState<US>>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    tracing::debug!("Getting all users");

    state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(
                StatusCode::ACCEPTED,
                users.iter().map(UserData::from).collect(),
            )
        })
}
