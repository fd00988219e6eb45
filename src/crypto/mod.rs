//! Cryptographic primitives for the vault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - The persisted `EncryptedBlob` record (`blob`)
//! - AES-256-GCM sealing and opening of a secret string (`encryption`)

pub mod blob;
pub mod encryption;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt_secret, decrypt_secret, EncryptedBlob};
pub use blob::EncryptedBlob;
pub use encryption::{
    decrypt_secret, encrypt_secret, encrypt_secret_with_iterations, NONCE_LEN,
};
pub use kdf::{
    derive_key, derive_key_with_iterations, generate_salt, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN,
};
