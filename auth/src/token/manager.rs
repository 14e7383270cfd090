use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;

use super::codec;
use super::errors::TokenError;
use super::models::Token;
use super::store::InMemoryTokenStore;
use super::store::TokenStore;

/// Issues, validates and revokes tokens against an injected store.
///
/// A user has at most one live token: generating a new one replaces the
/// stored entry, which makes any previously issued token stale.
pub struct TokenManager<S: TokenStore = InMemoryTokenStore> {
    store: Arc<S>,
    ttl: Duration,
}

impl TokenManager<InMemoryTokenStore> {
    /// Create a token manager backed by a fresh in-memory store.
    ///
    /// # Arguments
    /// * `ttl` - Lifetime of generated tokens
    pub fn new(ttl: Duration) -> Self {
        Self::with_store(Arc::new(InMemoryTokenStore::new()), ttl)
    }
}

impl Default for TokenManager<InMemoryTokenStore> {
    fn default() -> Self {
        Self::new(Duration::minutes(Self::DEFAULT_TTL_MINUTES))
    }
}

impl<S: TokenStore> TokenManager<S> {
    /// Token lifetime used when none is configured.
    pub const DEFAULT_TTL_MINUTES: i64 = 5;

    /// Create a token manager over an existing store.
    ///
    /// # Arguments
    /// * `store` - Shared token store
    /// * `ttl` - Lifetime of generated tokens
    pub fn with_store(store: Arc<S>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Lifetime of generated tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Handle to the underlying store, for inspection.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Generate a token for a user and make it the user's live token.
    ///
    /// # Arguments
    /// * `user_id` - User identifier, becomes the store key
    /// * `username` - Username bound into the token content
    ///
    /// # Returns
    /// Newly stored token expiring `ttl` from now
    ///
    /// # Errors
    /// * `EmptySubject` - User id or username is empty
    /// * `ReservedDelimiter` - User id or username contains the delimiter
    /// * `NonPositiveTtl` - Configured lifetime is zero or negative
    /// * `ExpiryOutOfRange` - Lifetime pushes the expiry past the representable range
    pub fn generate(&self, user_id: &str, username: &str) -> Result<Token, TokenError> {
        if self.ttl <= Duration::zero() {
            return Err(TokenError::NonPositiveTtl);
        }

        let content = codec::encode_content(user_id, username)?;
        let now = Utc::now();
        let token = Token::new(content, now, self.ttl)?;

        if let Some(previous) = self.store.insert(user_id.to_string(), token.clone()) {
            tracing::info!(
                user_id = %user_id,
                previous_expired = previous.is_expired_at(now),
                "User already had a token, replacing it"
            );
        }

        Ok(token)
    }

    /// Check a presented token.
    ///
    /// # Arguments
    /// * `expected_user_id` - User the token must belong to, or `None` for any user
    /// * `token` - Token presented by the caller
    ///
    /// # Returns
    /// True only if the token decodes to a user (matching `expected_user_id`
    /// when given) whose stored token is the presented one and is unexpired
    pub fn is_valid(&self, expected_user_id: Option<&str>, token: &Token) -> bool {
        let Some(user_id) = codec::decode_user_id(&token.content) else {
            tracing::debug!("Token content could not be decoded");
            return false;
        };

        if let Some(expected) = expected_user_id {
            if expected != user_id {
                tracing::debug!(expected = %expected, actual = %user_id, "Token user mismatch");
                return false;
            }
        }

        match self.store.get(&user_id) {
            None => false,
            Some(stored) if stored.is_expired_at(Utc::now()) => {
                tracing::debug!(user_id = %user_id, "Stored token is expired");
                false
            }
            Some(stored) => stored == *token,
        }
    }

    /// Revoke the live token of a user.
    ///
    /// # Arguments
    /// * `expected_user_id` - User the token must belong to
    /// * `token` - Token presented by the caller
    ///
    /// # Returns
    /// True if the token belongs to `expected_user_id` and an entry was removed
    pub fn revoke(&self, expected_user_id: &str, token: &Token) -> bool {
        match codec::decode_user_id(&token.content) {
            Some(user_id) if user_id == expected_user_id => {
                let removed = self.store.remove(&user_id).is_some();
                if removed {
                    tracing::info!(user_id = %user_id, "Token revoked");
                }
                removed
            }
            _ => false,
        }
    }
}
