//! AES-256-GCM entry encryption for the file store.
//!
//! Each entry is sealed with a key derived by HKDF-SHA256 from the store's
//! master key and the entry's (scope, key) context, so ciphertext moved to a
//! different entry fails authentication.
//!
//! # Wire Format
//!
//! ```text
//! [1 byte version][12 bytes nonce][N bytes ciphertext][16 bytes auth tag]
//! ```

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::Argon2;
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

const ENCRYPTION_VERSION: u8 = 1;
const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;

/// Salt length for passphrase-derived master keys.
pub(crate) const SALT_SIZE: usize = 16;

/// Encryption error types.
#[derive(Debug, thiserror::Error)]
pub enum EncryptionError {
    #[error("encryption failed: {0}")]
    EncryptFailed(String),
    #[error("decryption failed: {0}")]
    DecryptFailed(String),
    #[error("invalid ciphertext format")]
    InvalidFormat,
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),
}

pub(crate) type EncryptionResult<T> = Result<T, EncryptionError>;

/// Master key holder; wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct EntryCipher {
    master_key: [u8; 32],
}

impl EntryCipher {
    pub(crate) fn new(master_key: [u8; 32]) -> Self {
        Self { master_key }
    }

    /// Derive the master key from a passphrase with Argon2id.
    pub(crate) fn from_passphrase(passphrase: &[u8], salt: &[u8]) -> EncryptionResult<Self> {
        let mut key = [0u8; 32];
        Argon2::default()
            .hash_password_into(passphrase, salt, &mut key)
            .map_err(|e| EncryptionError::KeyDerivation(e.to_string()))?;
        let cipher = Self::new(key);
        key.zeroize();
        Ok(cipher)
    }

    fn entry_cipher(&self, context: &[u8]) -> EncryptionResult<Aes256Gcm> {
        let hk = Hkdf::<Sha256>::new(None, &self.master_key);
        let mut key = [0u8; 32];
        hk.expand(context, &mut key)
            .map_err(|e| EncryptionError::KeyDerivation(e.to_string()))?;
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| EncryptionError::KeyDerivation(e.to_string()));
        key.zeroize();
        cipher
    }

    pub(crate) fn encrypt(&self, plaintext: &[u8], context: &[u8]) -> EncryptionResult<Vec<u8>> {
        let cipher = self.entry_cipher(context)?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
            .map_err(|e| EncryptionError::EncryptFailed(e.to_string()))?;

        let mut sealed = Vec::with_capacity(1 + NONCE_SIZE + ciphertext.len());
        sealed.push(ENCRYPTION_VERSION);
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    pub(crate) fn decrypt(&self, sealed: &[u8], context: &[u8]) -> EncryptionResult<Vec<u8>> {
        if sealed.len() < 1 + NONCE_SIZE + TAG_SIZE {
            return Err(EncryptionError::InvalidFormat);
        }
        if sealed[0] != ENCRYPTION_VERSION {
            return Err(EncryptionError::UnsupportedVersion(sealed[0]));
        }

        let (nonce_bytes, ciphertext) = sealed[1..].split_at(NONCE_SIZE);
        let cipher = self.entry_cipher(context)?;
        cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| EncryptionError::DecryptFailed("authentication failed".to_string()))
    }
}

/// Generate a random 256-bit master key.
pub fn generate_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut key);
    key
}

/// Generate a random salt for passphrase derivation.
pub(crate) fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}
