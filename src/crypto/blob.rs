//! The persisted form of an encrypted secret.
//!
//! Serialized as a JSON object whose byte fields are base64 strings:
//!
//! ```text
//! {"ciphertext":"<b64>","iv":"<b64>","salt":"<b64>"}
//! ```
//!
//! `iterations` is only written when the blob was sealed with a
//! non-default PBKDF2 count, so blobs written by the browser vault
//! (which never had the field) parse unchanged.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// AES-GCM ciphertext plus everything needed to re-derive its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBlob {
    /// AES-256-GCM output (ciphertext || 16-byte tag).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub ciphertext: Vec<u8>,

    /// 12-byte nonce, fresh for every encryption.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub iv: Vec<u8>,

    /// 16-byte PBKDF2 salt, fresh for every encryption.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// PBKDF2 iteration count, when it differs from the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
}

impl EncryptedBlob {
    /// Serialize to the JSON text stored under the vault's storage key.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| VaultError::SerializationError(format!("blob: {e}")))
    }

    /// Parse the JSON text read back from storage.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| VaultError::InvalidBlob(format!("blob JSON: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
