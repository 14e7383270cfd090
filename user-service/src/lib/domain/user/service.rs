use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::InMemoryTokenStore;
use auth::TokenStore;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Orchestrates the user repository and the authenticator: credential
/// hashing on create/update, token issuance on authenticate, and token
/// validation and revocation.
pub struct UserService<UR, S = InMemoryTokenStore>
where
    UR: UserRepository,
    S: TokenStore,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator<S>>,
}

impl<UR, S> UserService<UR, S>
where
    UR: UserRepository,
    S: TokenStore,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Credential and token coordinator
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator<S>>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    pub fn authenticator(&self) -> &Arc<Authenticator<S>> {
        &self.authenticator
    }
}

#[async_trait]
impl<UR, S> UserServicePort for UserService<UR, S>
where
    UR: UserRepository,
    S: TokenStore,
{
    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.find_all().await
    }

    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if command.password.is_empty() {
            return Err(UserError::EmptyPassword);
        }

        let salt = self.authenticator.generate_salt();
        let password_hash = self.authenticator.hash_password(&salt, &command.password);
        let now = Utc::now();

        let user = User {
            id: UserId::new(),
            full_name: command.full_name,
            username: command.username,
            password_hash,
            salt,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.save(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User created"
        );

        Ok(created_user)
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_full_name) = command.full_name {
            user.full_name = Some(new_full_name);
        }

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        // Supplied passwords are always plaintext. One that already verifies
        // under the stored salt leaves the hash untouched; anything else is
        // hashed under the stored salt.
        if let Some(new_password) = command.password {
            if new_password.is_empty() {
                return Err(UserError::EmptyPassword);
            }
            if !self
                .authenticator
                .verify_password(&user.salt, &new_password, &user.password_hash)
            {
                user.password_hash = self.authenticator.hash_password(&user.salt, &new_password);
                tracing::info!(user_id = %user.id, "Password changed");
            }
        }

        user.updated_at = Utc::now();

        self.repository.save(user).await
    }

    async fn authenticate(&self, id: &UserId, password: &str) -> Result<String, UserError> {
        let Some(user) = self.repository.find_by_id(id).await? else {
            tracing::info!(user_id = %id, "User could not be authenticated: user not found");
            return Err(UserError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(
                password,
                &user.salt,
                &user.password_hash,
                &user.id.to_string(),
                user.username.as_str(),
            )
            .map_err(|e| {
                tracing::info!(user_id = %id, error = %e, "User could not be authenticated");
                UserError::from(e)
            })?;

        tracing::info!(
            user_id = %id,
            expires_at = %result.token.expires_at,
            "Token issued"
        );

        Ok(result.access_token)
    }

    fn validate_token(&self, id: Option<&UserId>, access_token: &str) -> bool {
        let expected = id.map(UserId::to_string);
        self.authenticator
            .validate_token(expected.as_deref(), access_token)
    }

    fn revoke_token(&self, id: &UserId, access_token: &str) -> bool {
        self.authenticator
            .revoke_token(&id.to_string(), access_token)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::Username;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn save(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_all(&self) -> Result<Vec<User>, UserError>;
        }
    }

    fn service(repository: MockTestUserRepository) -> UserService<MockTestUserRepository> {
        UserService::new(
            Arc::new(repository),
            Arc::new(Authenticator::new(Duration::minutes(5))),
        )
    }

    fn stored_user(authenticator: &Authenticator, password: &str) -> User {
        let salt = authenticator.generate_salt();
        let now = Utc::now();
        User {
            id: UserId::new(),
            full_name: Some("John Smith".to_string()),
            username: Username::new("jsmith".to_string()).unwrap(),
            password_hash: authenticator.hash_password(&salt, password),
            salt,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_command(password: &str) -> CreateUserCommand {
        CreateUserCommand::new(
            Some("John Smith".to_string()),
            Username::new("jsmith".to_string()).unwrap(),
            password.to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        // Set up mock expectations
        repository
            .expect_save()
            .withf(|user| {
                user.username.as_str() == "jsmith"
                    && user.password_hash != "Secret1"
                    && user.password_hash.len() == 64
                    && !user.salt.is_empty()
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = service(repository);

        let result = service.create_user(create_command("Secret1")).await;
        assert!(result.is_ok());

        let user = result.unwrap();
        assert_eq!(user.username.as_str(), "jsmith");
        assert_ne!(user.password_hash, "Secret1");
        assert!(!user.salt.is_empty());
        assert!(!user.id.to_string().is_empty());
        assert!(service
            .authenticator()
            .verify_password(&user.salt, "Secret1", &user.password_hash));
    }

    #[tokio::test]
    async fn test_create_user_assigns_unique_ids_and_salts() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_save()
            .times(2)
            .returning(|user| Ok(user));

        let service = service(repository);

        let first = service.create_user(create_command("Secret1")).await.unwrap();
        let second = service.create_user(create_command("Secret1")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(first.salt, second.salt);
        assert_ne!(first.password_hash, second.password_hash);
    }

    #[tokio::test]
    async fn test_create_user_empty_password() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_save().times(0);

        let service = service(repository);

        let result = service.create_user(create_command("")).await;
        assert!(matches!(result.unwrap_err(), UserError::EmptyPassword));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_save().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = service(repository);

        let result = service.create_user(create_command("Secret1")).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_list_users() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = Authenticator::new(Duration::minutes(5));
        let users = vec![
            stored_user(&authenticator, "one"),
            stored_user(&authenticator, "two"),
        ];

        let returned_users = users.clone();
        repository
            .expect_find_all()
            .times(1)
            .returning(move || Ok(returned_users.clone()));

        let service = service(repository);

        let result = service.list_users().await.unwrap();
        assert_eq!(result, users);
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = Authenticator::new(Duration::minutes(5));
        let user = stored_user(&authenticator, "Secret1");
        let user_id = user.id;

        let returned_user = user.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = service(repository);

        let access_token = service
            .authenticate(&user_id, "Secret1")
            .await
            .expect("Authentication failed");

        assert!(!access_token.is_empty());
        assert!(service.validate_token(Some(&user_id), &access_token));
        assert!(service.validate_token(None, &access_token));
        assert!(!service.validate_token(Some(&UserId::new()), &access_token));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = Authenticator::new(Duration::minutes(5));
        let user = stored_user(&authenticator, "Secret1");
        let user_id = user.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(repository);

        let result = service.authenticate(&user_id, "wrong").await;
        assert!(matches!(result.unwrap_err(), UserError::InvalidCredentials));
        assert!(service.authenticator().token_manager().store().is_empty());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository);

        let result = service.authenticate(&UserId::new(), "Secret1").await;
        assert!(matches!(result.unwrap_err(), UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_validate_malformed_token() {
        let service = service(MockTestUserRepository::new());

        assert!(!service.validate_token(None, "not-a-token"));
        assert!(!service.validate_token(Some(&UserId::new()), ""));
    }

    #[tokio::test]
    async fn test_revoke_token() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = Authenticator::new(Duration::minutes(5));
        let user = stored_user(&authenticator, "Secret1");
        let user_id = user.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(repository);
        let access_token = service.authenticate(&user_id, "Secret1").await.unwrap();

        assert!(!service.revoke_token(&UserId::new(), &access_token));
        assert!(service.validate_token(Some(&user_id), &access_token));

        assert!(service.revoke_token(&user_id, &access_token));
        assert!(!service.validate_token(Some(&user_id), &access_token));
        assert!(!service.revoke_token(&user_id, &access_token));
    }

    #[tokio::test]
    async fn test_update_user_changes_password_under_existing_salt() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = Authenticator::new(Duration::minutes(5));
        let existing_user = stored_user(&authenticator, "Secret1");
        let user_id = existing_user.id;
        let salt = existing_user.salt.clone();
        let created_at = existing_user.created_at;
        let expected_hash = authenticator.hash_password(&salt, "Secret2");

        let returned_user = existing_user.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        repository
            .expect_save()
            .withf(move |user| {
                user.id == user_id
                    && user.salt == salt
                    && user.password_hash == expected_hash
                    && user.username.as_str() == "johnsmith"
                    && user.created_at == created_at
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = service(repository);

        let command = UpdateUserCommand {
            full_name: None,
            username: Some(Username::new("johnsmith".to_string()).unwrap()),
            password: Some("Secret2".to_string()),
        };

        let updated_user = service.update_user(&user_id, command).await.unwrap();
        assert_eq!(updated_user.full_name.as_deref(), Some("John Smith"));
        assert!(updated_user.updated_at >= existing_user.updated_at);
    }

    #[tokio::test]
    async fn test_update_user_same_password_keeps_hash() {
        let mut repository = MockTestUserRepository::new();
        let authenticator = Authenticator::new(Duration::minutes(5));
        let existing_user = stored_user(&authenticator, "Secret1");
        let user_id = existing_user.id;
        let existing_hash = existing_user.password_hash.clone();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing_user.clone())));

        repository
            .expect_save()
            .withf(move |user| user.password_hash == existing_hash)
            .times(1)
            .returning(|user| Ok(user));

        let service = service(repository);

        let command = UpdateUserCommand {
            password: Some("Secret1".to_string()),
            ..Default::default()
        };

        assert!(service.update_user(&user_id, command).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_save().times(0);

        let service = service(repository);

        let command = UpdateUserCommand {
            full_name: Some("Jane Doe".to_string()),
            ..Default::default()
        };

        let result = service.update_user(&UserId::new(), command).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[test]
    fn test_wrap_response() {
        let service = service(MockTestUserRepository::new());

        let body = service.wrap_response("hello").expect("Failed to wrap response");
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value, serde_json::json!({ "data": "hello" }));
    }
}
