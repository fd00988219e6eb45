//! How outbound calls to the analysis backend authenticate.
//!
//! The backend accepts the user's model API key in a request header.  When
//! the vault cannot hand out a key (no vault, locked, or expired), callers
//! run the analysis in local mode instead.  That decision lives here, not
//! in the vault.

use std::fmt;

use zeroize::Zeroizing;

use crate::vault::Vault;

/// Header carrying the user's model API key.
pub const API_KEY_HEADER: &str = "X-Model-API-Key";

/// Credentials to attach to a backend request.
pub enum BackendAuth {
    /// Send the key in `header`.
    ApiKey {
        header: &'static str,
        value: Zeroizing<String>,
    },
    /// No key available; fall back to the local model.
    LocalFallback,
}

impl BackendAuth {
    pub fn is_local(&self) -> bool {
        matches!(self, Self::LocalFallback)
    }

    /// `Header: value` line, if there is a key.
    pub fn header_line(&self) -> Option<String> {
        match self {
            Self::ApiKey { header, value } => Some(format!("{header}: {}", value.as_str())),
            Self::LocalFallback => None,
        }
    }
}

impl fmt::Debug for BackendAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey { header, .. } => f
                .debug_struct("ApiKey")
                .field("header", header)
                .field("value", &"<redacted>")
                .finish(),
            Self::LocalFallback => f.write_str("LocalFallback"),
        }
    }
}

/// Pick the credentials for the next backend request.
pub fn backend_auth(vault: &mut Vault) -> BackendAuth {
    match vault.get_key() {
        Some(key) => BackendAuth::ApiKey {
            header: API_KEY_HEADER,
            value: Zeroizing::new(key.to_string()),
        },
        None => BackendAuth::LocalFallback,
    }
}
