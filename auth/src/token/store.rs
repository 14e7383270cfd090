use std::collections::HashMap;

use parking_lot::RwLock;

use super::models::Token;

/// Storage for the single live token of each user, keyed by user id.
///
/// Each method is one atomic operation on the mapping. Implementations other
/// than the in-memory one (e.g. a shared cache) plug in behind `TokenManager`
/// without changes to its callers.
pub trait TokenStore: Send + Sync + 'static {
    /// Get the token currently stored for a user.
    fn get(&self, user_id: &str) -> Option<Token>;

    /// Store a token for a user, replacing any previous one.
    ///
    /// # Returns
    /// The token that was replaced, if any
    fn insert(&self, user_id: String, token: Token) -> Option<Token>;

    /// Remove the token stored for a user.
    ///
    /// # Returns
    /// The removed token, if one existed
    fn remove(&self, user_id: &str) -> Option<Token>;

    /// Number of stored tokens, expired ones included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local token store guarded by a single lock.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    entries: RwLock<HashMap<String, Token>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn get(&self, user_id: &str) -> Option<Token> {
        self.entries.read().get(user_id).cloned()
    }

    fn insert(&self, user_id: String, token: Token) -> Option<Token> {
        self.entries.write().insert(user_id, token)
    }

    fn remove(&self, user_id: &str) -> Option<Token> {
        self.entries.write().remove(user_id)
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
