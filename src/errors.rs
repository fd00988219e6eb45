use thiserror::Error;

/// All errors that can occur in the SmartCV vault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong password or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("No vault found")]
    NoVault,

    #[error("Invalid vault blob: {0}")]
    InvalidBlob(String),

    // --- Storage errors ---
    #[error("Invalid storage key: {0}")]
    InvalidStorageKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for vault results.
pub type Result<T> = std::result::Result<T, VaultError>;
