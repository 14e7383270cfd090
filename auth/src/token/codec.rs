//! Token content and transport encodings.
//!
//! Content is `base64(user_id + "." + username)`. It is an encoding, not a
//! signature: anyone holding a token can read the subject back out of it.
//! The transport form handed to clients is `base64(json(Token))`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::errors::TokenError;
use super::models::Token;

/// Separator between user id and username inside token content.
pub const DELIMITER: char = '.';

/// Encode a user id and username into token content.
///
/// # Errors
/// * `EmptySubject` - Either part is empty
/// * `ReservedDelimiter` - Either part contains `DELIMITER`
pub fn encode_content(user_id: &str, username: &str) -> Result<String, TokenError> {
    if user_id.is_empty() || username.is_empty() {
        return Err(TokenError::EmptySubject);
    }
    for part in [user_id, username] {
        if part.contains(DELIMITER) {
            return Err(TokenError::ReservedDelimiter(part.to_string()));
        }
    }

    Ok(STANDARD.encode(format!("{user_id}{DELIMITER}{username}")))
}

/// Recover the user id from token content.
///
/// Returns `None` unless the content is valid base64 of UTF-8 text that
/// splits into exactly two parts with a non-empty user id.
pub fn decode_user_id(content: &str) -> Option<String> {
    let bytes = STANDARD.decode(content).ok()?;
    let text = String::from_utf8(bytes).ok()?;

    let parts: Vec<&str> = text.split(DELIMITER).collect();
    match parts.as_slice() {
        [user_id, _username] if !user_id.is_empty() => Some(user_id.to_string()),
        _ => None,
    }
}

/// Serialize a token into its transport form.
///
/// # Errors
/// * `Encoding` - JSON serialization failed
pub fn encode_transport(token: &Token) -> Result<String, TokenError> {
    let json = serde_json::to_string(token).map_err(|e| TokenError::Encoding(e.to_string()))?;
    Ok(STANDARD.encode(json))
}

/// Parse a token from its transport form.
///
/// # Errors
/// * `Decoding` - Input is not base64, not UTF-8, or not a serialized token
pub fn decode_transport(encoded: &str) -> Result<Token, TokenError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| TokenError::Decoding(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| TokenError::Decoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_encode_content_matches_wire_format() {
        let content = encode_content("1", "jsmith").unwrap();
        assert_eq!(content, STANDARD.encode("1.jsmith"));
    }

    #[test]
    fn test_decode_user_id() {
        let content = encode_content("9b2f6a0e-57a4-4b7c-9d0e-1f2a3b4c5d6e", "jsmith").unwrap();
        assert_eq!(
            decode_user_id(&content),
            Some("9b2f6a0e-57a4-4b7c-9d0e-1f2a3b4c5d6e".to_string())
        );
    }

    #[test]
    fn test_encode_content_rejects_empty_parts() {
        assert_eq!(encode_content("", "jsmith"), Err(TokenError::EmptySubject));
        assert_eq!(encode_content("1", ""), Err(TokenError::EmptySubject));
    }

    #[test]
    fn test_encode_content_rejects_delimiter() {
        assert!(matches!(
            encode_content("1", "j.smith"),
            Err(TokenError::ReservedDelimiter(_))
        ));
    }

    #[test]
    fn test_decode_user_id_wrong_part_count() {
        assert_eq!(decode_user_id(&STANDARD.encode("test")), None);
        assert_eq!(decode_user_id(&STANDARD.encode("1.j.smith")), None);
        assert_eq!(decode_user_id(&STANDARD.encode(".jsmith")), None);
    }

    #[test]
    fn test_decode_user_id_not_base64() {
        assert_eq!(decode_user_id("not base64!"), None);
    }

    #[test]
    fn test_transport_decodes_to_same_token() {
        let token = Token::new(
            encode_content("1", "jsmith").unwrap(),
            Utc::now(),
            Duration::minutes(5),
        )
        .unwrap();

        let encoded = encode_transport(&token).unwrap();
        assert_eq!(decode_transport(&encoded).unwrap(), token);
    }

    #[test]
    fn test_decode_transport_garbage() {
        assert!(matches!(
            decode_transport("%%%"),
            Err(TokenError::Decoding(_))
        ));
        assert!(matches!(
            decode_transport(&STANDARD.encode("{\"content\": 1}")),
            Err(TokenError::Decoding(_))
        ));
    }
}
