//! The vault state machine.
//!
//! ```text
//!   NoVault ──save_key──▶ Unlocked ◀──unlock_vault── Locked
//!      ▲                     │  lock_vault / expiry      ▲
//!      │                     └───────────────────────────┘
//!      └──────────── clear_vault (from any state)
//! ```
//!
//! The decrypted key only ever lives in the private `session` field; the
//! only ways to observe it are `get_key` and the derived `VaultStatus`.
//! Expiry is checked lazily: `get_key` drops a session whose TTL has
//! passed, and `status` already reports it as locked.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::{decrypt_secret, encrypt_secret_with_iterations, EncryptedBlob};
use crate::errors::{Result, VaultError};

use super::clock::{Clock, SystemClock};
use super::session::VaultSession;
use super::store::{validate_storage_key, PersistentStore};

/// Shown when `save_key` fails for any reason.
pub const MSG_SAVE_FAILED: &str = "Failed to encrypt and save key.";

/// Shown for every unlock failure that involves an existing blob.
pub const MSG_INCORRECT_PASSWORD: &str = "Incorrect password.";

/// Shown when unlocking with nothing persisted.
pub const MSG_NO_VAULT: &str = "No vault found.";

/// Shown when the persisted blob could not be deleted.
pub const MSG_CLEAR_FAILED: &str = "Failed to clear vault.";

/// Where the vault is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    /// Nothing persisted.
    NoVault,
    /// A blob is persisted but no valid session exists.
    Locked,
    /// A blob is persisted and the key is in memory.
    Unlocked,
}

impl VaultState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoVault => "no vault",
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
        }
    }
}

impl fmt::Display for VaultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the UI is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultStatus {
    pub has_vault: bool,
    pub is_locked: bool,
    pub error: Option<String>,
}

/// Custody of one encrypted API key and its in-memory session.
pub struct Vault {
    store: Box<dyn PersistentStore>,
    clock: Box<dyn Clock>,
    storage_key: String,
    session_ttl: Duration,
    pbkdf2_iterations: u32,
    has_vault: bool,
    session: Option<VaultSession>,
    error: Option<String>,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the vault backed by `store`, using the wall clock.
    ///
    /// The vault always starts without a session: `NoVault` when the store
    /// holds no blob, `Locked` otherwise.
    pub fn open(store: impl PersistentStore + 'static, settings: &Settings) -> Result<Self> {
        Self::with_clock(store, settings, SystemClock)
    }

    /// Open the vault with an explicit time source.
    pub fn with_clock(
        store: impl PersistentStore + 'static,
        settings: &Settings,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        validate_storage_key(&settings.storage_key)?;

        let has_vault = store.get(&settings.storage_key)?.is_some();

        info!(
            storage_key = %settings.storage_key,
            has_vault,
            "vault opened"
        );

        Ok(Self {
            store: Box::new(store),
            clock: Box::new(clock),
            storage_key: settings.storage_key.clone(),
            session_ttl: settings.session_ttl(),
            pbkdf2_iterations: settings.pbkdf2_iterations,
            has_vault,
            session: None,
            error: None,
        })
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Encrypt `secret` under `password`, persist it (replacing any
    /// previous blob) and start a fresh session.
    ///
    /// On failure the previous blob and session are left untouched.
    pub fn save_key(&mut self, secret: &str, password: &str) -> Result<()> {
        self.error = None;

        let result = encrypt_secret_with_iterations(secret, password, self.pbkdf2_iterations)
            .and_then(|blob| blob.to_json())
            .and_then(|json| self.store.set(&self.storage_key, &json));

        if let Err(e) = result {
            warn!(error = %e, "failed to save vault key");
            self.error = Some(MSG_SAVE_FAILED.to_string());
            return Err(match e {
                VaultError::EncryptionFailed(_) => e,
                other => VaultError::EncryptionFailed(other.to_string()),
            });
        }

        let expires_at = self.start_session(Zeroizing::new(secret.to_string()));
        info!(%expires_at, "vault key saved and unlocked");
        self.has_vault = true;
        Ok(())
    }

    /// Decrypt the persisted blob with `password` and start a session.
    ///
    /// A wrong password, a damaged blob and an unreadable store all fail
    /// the same way: the session is dropped and the error reads
    /// "Incorrect password.".
    pub fn unlock_vault(&mut self, password: &str) -> Result<()> {
        self.error = None;

        let stored = match self.store.get(&self.storage_key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                // The blob may have been removed behind our back.
                self.has_vault = false;
                self.session = None;
                self.error = Some(MSG_NO_VAULT.to_string());
                return Err(VaultError::NoVault);
            }
            Err(e) => {
                warn!(error = %e, "failed to read vault blob");
                return Err(self.fail_unlock());
            }
        };
        self.has_vault = true;

        let secret = match EncryptedBlob::from_json(&stored)
            .and_then(|blob| decrypt_secret(&blob, password))
        {
            Ok(secret) => secret,
            Err(_) => {
                warn!("vault unlock failed");
                return Err(self.fail_unlock());
            }
        };

        let expires_at = self.start_session(secret);
        info!(%expires_at, "vault unlocked");
        Ok(())
    }

    /// Return the key if the vault is unlocked and the session is still
    /// within its TTL.
    ///
    /// An expired session is dropped here and the vault reverts to
    /// `Locked` before `None` is returned.
    pub fn get_key(&mut self) -> Option<&str> {
        let now = self.clock.now();
        let expired = self
            .session
            .as_ref()
            .is_some_and(|s| !s.is_valid_at(now));

        if expired {
            self.session = None;
            info!("vault session expired; vault locked");
            return None;
        }

        self.session.as_ref().map(VaultSession::key)
    }

    /// Drop the session.  Locking an already locked vault does nothing.
    pub fn lock_vault(&mut self) {
        self.error = None;
        if self.session.take().is_some() {
            info!("vault locked");
        }
    }

    /// Delete the persisted blob and drop the session.
    ///
    /// The session is dropped even when the store refuses the delete.
    pub fn clear_vault(&mut self) -> Result<()> {
        self.error = None;
        self.session = None;

        if let Err(e) = self.store.remove(&self.storage_key) {
            warn!(error = %e, "failed to remove vault blob");
            self.error = Some(MSG_CLEAR_FAILED.to_string());
            return Err(e);
        }

        self.has_vault = false;
        info!("vault cleared");
        Ok(())
    }

    /// Re-read whether a blob exists, e.g. after another process changed
    /// the store.  The session is not touched.
    pub fn refresh(&mut self) -> Result<()> {
        self.has_vault = self.store.get(&self.storage_key)?.is_some();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    pub fn status(&self) -> VaultStatus {
        VaultStatus {
            has_vault: self.has_vault,
            is_locked: self.valid_session().is_none(),
            error: self.error.clone(),
        }
    }

    pub fn state(&self) -> VaultState {
        if !self.has_vault {
            VaultState::NoVault
        } else if self.valid_session().is_some() {
            VaultState::Unlocked
        } else {
            VaultState::Locked
        }
    }

    /// When the current session stops being usable, if there is one.
    pub fn session_expires_at(&self) -> Option<DateTime<Utc>> {
        self.valid_session().map(VaultSession::expires_at)
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn valid_session(&self) -> Option<&VaultSession> {
        let now = self.clock.now();
        self.session.as_ref().filter(|s| s.is_valid_at(now))
    }

    /// Install a new session and return its expiry for logging.
    fn start_session(&mut self, key: Zeroizing<String>) -> DateTime<Utc> {
        let session = VaultSession::new(key, self.clock.now(), self.session_ttl);
        let expires_at = session.expires_at();
        self.session = Some(session);
        expires_at
    }

    fn fail_unlock(&mut self) -> VaultError {
        self.session = None;
        self.error = Some(MSG_INCORRECT_PASSWORD.to_string());
        VaultError::DecryptionFailed
    }
}

impl fmt::Debug for Vault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vault")
            .field("storage_key", &self.storage_key)
            .field("state", &self.state())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
