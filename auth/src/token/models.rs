use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Opaque bearer token bound to a single user.
///
/// `content` is the reversible encoding of the user id and username,
/// `expires_at` the absolute instant after which the token is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub content: String,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    /// Create a token expiring `ttl` after `issued_at`.
    ///
    /// # Errors
    /// * `ExpiryOutOfRange` - `issued_at + ttl` is not a representable instant
    pub fn new(
        content: String,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::ExpiryOutOfRange)?;

        Ok(Self { content, expires_at })
    }

    /// Check if the token is expired at the given instant.
    ///
    /// A token is still usable at exactly its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
