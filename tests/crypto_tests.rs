//! Integration tests for the crypto module.

use smartcv_vault::crypto::{
    decrypt_secret, derive_key, derive_key_with_iterations, encrypt_secret,
    encrypt_secret_with_iterations, generate_salt, EncryptedBlob, NONCE_LEN, SALT_LEN,
};
use smartcv_vault::errors::VaultError;

/// Iteration count for tests that don't care about KDF cost.
const FAST: u32 = 1_000;

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip_default_iterations() {
    let blob = encrypt_secret("sk-abc123", "hunter2").expect("encrypt should succeed");

    assert_eq!(blob.iv.len(), NONCE_LEN);
    assert_eq!(blob.salt.len(), SALT_LEN);
    assert!(blob.iterations.is_none());

    let recovered = decrypt_secret(&blob, "hunter2").expect("decrypt should succeed");
    assert_eq!(recovered.as_str(), "sk-abc123");
}

#[test]
fn roundtrip_various_secrets_and_passwords() {
    let cases = [
        ("sk-proj-0123456789abcdef", "correct horse battery staple"),
        ("gsk_ünïcødé_🔑", "pässwörd"),
        ("x", "p"),
        ("key with spaces and = signs", "  leading and trailing  "),
    ];

    for (secret, password) in cases {
        let blob = encrypt_secret_with_iterations(secret, password, FAST).expect("encrypt");
        let recovered = decrypt_secret(&blob, password).expect("decrypt");
        assert_eq!(recovered.as_str(), secret);
    }
}

#[test]
fn roundtrip_survives_json_storage() {
    let blob = encrypt_secret_with_iterations("sk-abc123", "hunter2", FAST).unwrap();
    let json = blob.to_json().unwrap();

    let parsed = EncryptedBlob::from_json(&json).unwrap();
    assert_eq!(parsed, blob);
    assert_eq!(
        decrypt_secret(&parsed, "hunter2").unwrap().as_str(),
        "sk-abc123"
    );
}

// ---------------------------------------------------------------------------
// Freshness
// ---------------------------------------------------------------------------

#[test]
fn encrypt_uses_fresh_iv_and_salt_each_time() {
    let a = encrypt_secret_with_iterations("sk-abc123", "hunter2", FAST).unwrap();
    let b = encrypt_secret_with_iterations("sk-abc123", "hunter2", FAST).unwrap();

    assert_ne!(a.iv, b.iv, "nonce must never repeat");
    assert_ne!(a.salt, b.salt, "salt must be regenerated");
    assert_ne!(a.ciphertext, b.ciphertext);
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn wrong_password_fails() {
    let pairs = [
        ("hunter2", "hunter3"),
        ("hunter2", "Hunter2"),
        ("hunter2", "hunter2 "),
        ("a", "b"),
    ];

    for (right, wrong) in pairs {
        let blob = encrypt_secret_with_iterations("sk-abc123", right, FAST).unwrap();
        let result = decrypt_secret(&blob, wrong);
        assert!(
            matches!(result, Err(VaultError::DecryptionFailed)),
            "password {wrong:?} must not open a vault sealed with {right:?}"
        );
    }
}

#[test]
fn corrupted_ciphertext_fails() {
    let mut blob = encrypt_secret_with_iterations("sk-abc123", "hunter2", FAST).unwrap();
    blob.ciphertext[0] ^= 0xFF;
    assert!(matches!(
        decrypt_secret(&blob, "hunter2"),
        Err(VaultError::DecryptionFailed)
    ));
}

#[test]
fn corrupted_tag_fails() {
    let mut blob = encrypt_secret_with_iterations("sk-abc123", "hunter2", FAST).unwrap();
    let last = blob.ciphertext.len() - 1;
    blob.ciphertext[last] ^= 0x01;
    assert!(decrypt_secret(&blob, "hunter2").is_err());
}

#[test]
fn truncated_ciphertext_fails() {
    let mut blob = encrypt_secret_with_iterations("sk-abc123", "hunter2", FAST).unwrap();
    blob.ciphertext.truncate(10);
    assert!(decrypt_secret(&blob, "hunter2").is_err());

    blob.ciphertext.clear();
    assert!(decrypt_secret(&blob, "hunter2").is_err());
}

#[test]
fn swapped_iv_or_salt_fails() {
    let a = encrypt_secret_with_iterations("sk-abc123", "hunter2", FAST).unwrap();
    let b = encrypt_secret_with_iterations("sk-abc123", "hunter2", FAST).unwrap();

    let mut wrong_iv = a.clone();
    wrong_iv.iv = b.iv.clone();
    assert!(decrypt_secret(&wrong_iv, "hunter2").is_err());

    let mut wrong_salt = a;
    wrong_salt.salt = b.salt;
    assert!(decrypt_secret(&wrong_salt, "hunter2").is_err());
}

#[test]
fn wrong_iteration_count_fails() {
    let mut blob = encrypt_secret_with_iterations("sk-abc123", "hunter2", FAST).unwrap();
    blob.iterations = Some(FAST + 1);
    assert!(decrypt_secret(&blob, "hunter2").is_err());
}

#[test]
fn wrong_password_and_corruption_are_indistinguishable() {
    let blob = encrypt_secret_with_iterations("sk-abc123", "hunter2", FAST).unwrap();

    let wrong_password = decrypt_secret(&blob, "nope").unwrap_err();

    let mut damaged = blob;
    damaged.ciphertext[3] ^= 0x10;
    let corrupted = decrypt_secret(&damaged, "hunter2").unwrap_err();

    assert_eq!(wrong_password.to_string(), corrupted.to_string());
}

// ---------------------------------------------------------------------------
// Key derivation (PBKDF2)
// ---------------------------------------------------------------------------

#[test]
fn derive_key_same_inputs_same_output() {
    let salt = generate_salt();
    let key1 = derive_key(b"my-secure-passphrase", &salt).expect("derive 1");
    let key2 = derive_key(b"my-secure-passphrase", &salt).expect("derive 2");
    assert_eq!(*key1, *key2, "same password + salt must produce the same key");
}

#[test]
fn derive_key_different_salts_different_keys() {
    let key1 = derive_key_with_iterations(b"same-password", &generate_salt(), FAST).unwrap();
    let key2 = derive_key_with_iterations(b"same-password", &generate_salt(), FAST).unwrap();
    assert_ne!(*key1, *key2, "different salts must produce different keys");
}

#[test]
fn derive_key_different_passwords_different_keys() {
    let salt = generate_salt();
    let key1 = derive_key_with_iterations(b"password-one", &salt, FAST).unwrap();
    let key2 = derive_key_with_iterations(b"password-two", &salt, FAST).unwrap();
    assert_ne!(*key1, *key2, "different passwords must produce different keys");
}
