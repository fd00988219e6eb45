//! AES-256-GCM authenticated encryption of a secret under a password.
//!
//! Each call to `encrypt_secret` draws a fresh 16-byte salt and a fresh
//! 12-byte nonce, derives the key with PBKDF2 and seals the UTF-8 bytes
//! of the secret.  The output layout matches Web Crypto's AES-GCM:
//!
//! ```text
//! ciphertext = [ encrypted secret | 16-byte auth tag ]
//! ```
//!
//! Every decryption failure collapses into `VaultError::DecryptionFailed`
//! so callers cannot tell a wrong password from a damaged blob.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use zeroize::{Zeroize, Zeroizing};

use super::blob::EncryptedBlob;
use super::kdf::{derive_key_with_iterations, generate_salt, PBKDF2_ITERATIONS, SALT_LEN};
use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Encrypt `secret` under `password` with the default iteration count.
pub fn encrypt_secret(secret: &str, password: &str) -> Result<EncryptedBlob> {
    encrypt_secret_with_iterations(secret, password, PBKDF2_ITERATIONS)
}

/// Encrypt `secret` under `password`, deriving the key with `iterations`
/// rounds of PBKDF2.
pub fn encrypt_secret_with_iterations(
    secret: &str,
    password: &str,
    iterations: u32,
) -> Result<EncryptedBlob> {
    if secret.is_empty() {
        return Err(VaultError::EncryptionFailed("secret is empty".into()));
    }
    if password.is_empty() {
        return Err(VaultError::EncryptionFailed("password is empty".into()));
    }

    let salt = generate_salt();
    let key = derive_key_with_iterations(password.as_bytes(), &salt, iterations)
        .map_err(|e| VaultError::EncryptionFailed(e.to_string()))?;

    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, secret.as_bytes())
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(EncryptedBlob {
        ciphertext,
        iv: nonce.to_vec(),
        salt: salt.to_vec(),
        iterations: (iterations != PBKDF2_ITERATIONS).then_some(iterations),
    })
}

/// Decrypt a blob produced by `encrypt_secret`.
///
/// The iteration count recorded in the blob wins; blobs without one use
/// the default.
pub fn decrypt_secret(blob: &EncryptedBlob, password: &str) -> Result<Zeroizing<String>> {
    if blob.iv.len() != NONCE_LEN || blob.salt.len() != SALT_LEN {
        return Err(VaultError::DecryptionFailed);
    }

    let iterations = blob.iterations.unwrap_or(PBKDF2_ITERATIONS);
    let key = derive_key_with_iterations(password.as_bytes(), &blob.salt, iterations)
        .map_err(|_| VaultError::DecryptionFailed)?;

    let cipher =
        Aes256Gcm::new_from_slice(key.as_slice()).map_err(|_| VaultError::DecryptionFailed)?;
    let nonce = Nonce::from_slice(&blob.iv);

    // Decrypt and verify the auth tag.
    let plaintext = cipher
        .decrypt(nonce, blob.ciphertext.as_slice())
        .map_err(|_| VaultError::DecryptionFailed)?;

    let secret = String::from_utf8(plaintext).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        VaultError::DecryptionFailed
    })?;
    let secret = Zeroizing::new(secret);

    if secret.is_empty() {
        return Err(VaultError::DecryptionFailed);
    }

    Ok(secret)
}
