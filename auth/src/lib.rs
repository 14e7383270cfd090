//! Authentication utilities library
//!
//! Provides the credential and token infrastructure for the user service:
//! - Salted credential hashing (SHA-256)
//! - Opaque bearer tokens with a per-user store and expiry
//! - Authentication coordination
//!
//! Tokens are an encoding of the user they were issued to, not a signature.
//! A token is only honoured while it is the live entry in the token store.
//!
//! # Examples
//!
//! ## Credential Hashing
//! ```
//! use auth::CredentialHasher;
//!
//! let hasher = CredentialHasher::new();
//! let salt = hasher.generate_salt();
//! let hash = hasher.hash(&salt, "my_password");
//! assert!(hasher.verify(&salt, "my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenManager;
//! use chrono::Duration;
//!
//! let manager = TokenManager::new(Duration::minutes(5));
//! let token = manager.generate("user123", "alice").unwrap();
//! assert!(manager.is_valid(Some("user123"), &token));
//! assert!(manager.revoke("user123", &token));
//! assert!(!manager.is_valid(Some("user123"), &token));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(Duration::minutes(5));
//!
//! // Register: salt and hash password
//! let salt = auth.generate_salt();
//! let hash = auth.hash_password(&salt, "password123");
//!
//! // Login: verify and issue token
//! let result = auth
//!     .authenticate("password123", &salt, &hash, "user123", "alice")
//!     .unwrap();
//!
//! // Validate token
//! assert!(auth.validate_token(Some("user123"), &result.access_token));
//! ```

pub mod authenticator;
pub mod credentials;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use credentials::CredentialHasher;
pub use token::InMemoryTokenStore;
pub use token::Token;
pub use token::TokenError;
pub use token::TokenManager;
pub use token::TokenStore;
