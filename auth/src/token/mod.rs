pub mod codec;
pub mod errors;
pub mod manager;
pub mod models;
pub mod store;

pub use errors::TokenError;
pub use manager::TokenManager;
pub use models::Token;
pub use store::InMemoryTokenStore;
pub use store::TokenStore;
