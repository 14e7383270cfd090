use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use sha2::Digest;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Salted credential hashing.
///
/// Stored hashes are the hex SHA-256 digest of `salt` followed by the
/// plaintext, so a password is verified by recomputing the digest under the
/// stored salt.
pub struct CredentialHasher;

impl CredentialHasher {
    /// Number of random bytes in a generated salt.
    pub const SALT_BYTES: usize = 32;

    /// Create a new credential hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh random salt.
    ///
    /// # Returns
    /// Base64 text of `SALT_BYTES` bytes drawn from the thread CSPRNG
    pub fn generate_salt(&self) -> String {
        let mut bytes = [0u8; Self::SALT_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        STANDARD.encode(bytes)
    }

    /// Hash a plaintext password under a salt.
    ///
    /// # Arguments
    /// * `salt` - Salt text as produced by `generate_salt`
    /// * `plaintext` - Plaintext password
    ///
    /// # Returns
    /// 64 character lowercase hex digest
    pub fn hash(&self, salt: &str, plaintext: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(plaintext.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Arguments
    /// * `salt` - Salt stored alongside the hash
    /// * `plaintext` - Plaintext password to verify
    /// * `stored_hash` - Previously computed hash
    ///
    /// # Returns
    /// True if the recomputed hash matches, compared in constant time
    pub fn verify(&self, salt: &str, plaintext: &str, stored_hash: &str) -> bool {
        self.hash(salt, plaintext)
            .as_bytes()
            .ct_eq(stored_hash.as_bytes())
            .into()
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}
