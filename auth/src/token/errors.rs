use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token subject requires a non-empty user id and username")]
    EmptySubject,

    #[error("Token subject contains the reserved delimiter: {0}")]
    ReservedDelimiter(String),

    #[error("Token lifetime must be positive")]
    NonPositiveTtl,

    #[error("Token expiry is out of range")]
    ExpiryOutOfRange,

    #[error("Failed to encode token: {0}")]
    Encoding(String),

    #[error("Failed to decode token: {0}")]
    Decoding(String),
}
