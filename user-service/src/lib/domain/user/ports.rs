use async_trait::async_trait;
use serde::Serialize;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
///
/// Validation, credential and token failures are reported through the
/// returned values; implementations never panic on caller input.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve all users.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Create new user with a freshly generated id and salt.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `command` - Command with optional full name, username and password fields
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmptyPassword` - Supplied password is empty
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Verify a password and issue a token for the user.
    ///
    /// # Arguments
    /// * `id` - User ID
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Transport-encoded access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password
    /// * `TokenGeneration` - Token could not be generated
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, id: &UserId, password: &str) -> Result<String, UserError>;

    /// Check an access token, optionally requiring that it belongs to `id`.
    fn validate_token(&self, id: Option<&UserId>, access_token: &str) -> bool;

    /// Revoke the live token of `id` if `access_token` belongs to it.
    fn revoke_token(&self, id: &UserId, access_token: &str) -> bool;

    /// Wrap a payload into a `{"data": payload}` JSON envelope.
    ///
    /// # Returns
    /// Serialized envelope, or None if serialization failed
    fn wrap_response(&self, payload: &str) -> Option<String> {
        #[derive(Serialize)]
        struct DataEnvelope<'a> {
            data: &'a str,
        }

        serde_json::to_string(&DataEnvelope { data: payload })
            .map_err(|e| tracing::error!(error = %e, "Failed to build response envelope"))
            .ok()
    }
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert or replace a user, keyed by id.
    ///
    /// # Arguments
    /// * `user` - User entity to persist
    ///
    /// # Returns
    /// Persisted user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve all users from storage, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_all(&self) -> Result<Vec<User>, UserError>;
}
