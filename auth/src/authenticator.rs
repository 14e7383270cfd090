use chrono::Duration;

use crate::credentials::CredentialHasher;
use crate::token::codec;
use crate::token::InMemoryTokenStore;
use crate::token::Token;
use crate::token::TokenError;
use crate::token::TokenManager;
use crate::token::TokenStore;

/// Authentication coordinator combining credential hashing and token handling.
///
/// Provides high-level authentication operations by coordinating
/// credential verification and the token lifecycle, and owns the transport
/// encoding of tokens handed to clients.
pub struct Authenticator<S: TokenStore = InMemoryTokenStore> {
    credential_hasher: CredentialHasher,
    token_manager: TokenManager<S>,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Transport-encoded access token
    pub access_token: String,
    /// Token as stored for the user
    pub token: Token,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator<InMemoryTokenStore> {
    /// Create a new authenticator with an in-memory token store.
    ///
    /// # Arguments
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(token_ttl: Duration) -> Self {
        Self::with_token_manager(TokenManager::new(token_ttl))
    }
}

impl<S: TokenStore> Authenticator<S> {
    /// Create an authenticator around an existing token manager.
    pub fn with_token_manager(token_manager: TokenManager<S>) -> Self {
        Self {
            credential_hasher: CredentialHasher::new(),
            token_manager,
        }
    }

    pub fn token_manager(&self) -> &TokenManager<S> {
        &self.token_manager
    }

    /// Generate a fresh salt for a new credential.
    pub fn generate_salt(&self) -> String {
        self.credential_hasher.generate_salt()
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `salt` - Salt stored with the user
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Hex digest of salt followed by password
    pub fn hash_password(&self, salt: &str, password: &str) -> String {
        self.credential_hasher.hash(salt, password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, salt: &str, password: &str, stored_hash: &str) -> bool {
        self.credential_hasher.verify(salt, password, stored_hash)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `salt` - Stored salt
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Identifier of the authenticating user
    /// * `username` - Username bound into the token
    ///
    /// # Returns
    /// AuthenticationResult with the transport-encoded access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token generation or encoding failed
    pub fn authenticate(
        &self,
        password: &str,
        salt: &str,
        stored_hash: &str,
        user_id: &str,
        username: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(salt, password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let token = self.token_manager.generate(user_id, username)?;
        let access_token = codec::encode_transport(&token)?;

        Ok(AuthenticationResult {
            access_token,
            token,
        })
    }

    /// Validate a transport-encoded token.
    ///
    /// Malformed input is reported as an invalid token.
    ///
    /// # Arguments
    /// * `expected_user_id` - User the token must belong to, or `None` for any user
    /// * `access_token` - Transport-encoded token
    pub fn validate_token(&self, expected_user_id: Option<&str>, access_token: &str) -> bool {
        match codec::decode_transport(access_token) {
            Ok(token) => self.token_manager.is_valid(expected_user_id, &token),
            Err(e) => {
                tracing::warn!(error = %e, "Rejecting malformed token during validation");
                false
            }
        }
    }

    /// Revoke a transport-encoded token.
    ///
    /// # Arguments
    /// * `expected_user_id` - User the token must belong to
    /// * `access_token` - Transport-encoded token
    ///
    /// # Returns
    /// True if a live entry for the user was removed
    pub fn revoke_token(&self, expected_user_id: &str, access_token: &str) -> bool {
        match codec::decode_transport(access_token) {
            Ok(token) => self.token_manager.revoke(expected_user_id, &token),
            Err(e) => {
                tracing::warn!(error = %e, "Rejecting malformed token during revocation");
                false
            }
        }
    }
}
