//! The decrypted API key held in memory for a bounded time.
//!
//! A `VaultSession` is never serialized and has no `Debug` output that
//! includes the key.  The plaintext lives in a `Zeroizing<String>` so it
//! is wiped when the session is dropped (on lock, clear, or expiry).

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use zeroize::Zeroizing;

pub struct VaultSession {
    plaintext_key: Zeroizing<String>,
    expires_at: DateTime<Utc>,
}

impl VaultSession {
    /// Start a session at `now` that lives for `ttl`.
    pub fn new(plaintext_key: Zeroizing<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            plaintext_key,
            expires_at: now + ttl,
        }
    }

    /// A session is valid only while `now < expires_at`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn key(&self) -> &str {
        &self.plaintext_key
    }
}

impl fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultSession")
            .field("plaintext_key", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
