//! Local encryption key derived from the signed-in identity
//!
//! Lets the wallet unlock its encrypted private key without asking the user
//! for a separate PIN. The key is only as secret as the user id and salt.

use sha2::{Digest, Sha256};

pub const DEFAULT_ENCRYPT_SALT: &str = "vesu_default_salt";

pub trait KeyDeriver {
    /// Deterministic, one-way; same user id always yields the same key
    fn derive_encrypt_key(&self, user_id: &str) -> String;
}

/// `hex(sha256("{user_id}:{salt}"))`, 64 lower-case hex characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltedSha256Deriver {
    salt: String,
}

impl SaltedSha256Deriver {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Salt from `ENCRYPT_SALT`, falling back to the default salt
    pub fn from_env() -> Self {
        match std::env::var("ENCRYPT_SALT") {
            Ok(salt) if !salt.trim().is_empty() => Self::new(salt),
            _ => Self::default(),
        }
    }
}

impl Default for SaltedSha256Deriver {
    fn default() -> Self {
        Self::new(DEFAULT_ENCRYPT_SALT)
    }
}

impl KeyDeriver for SaltedSha256Deriver {
    fn derive_encrypt_key(&self, user_id: &str) -> String {
        derive_encrypt_key(user_id, &self.salt)
    }
}

pub fn derive_encrypt_key(user_id: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_bytes());
    hasher.update(b":");
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}
