use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::PBKDF2_ITERATIONS;
use crate::errors::{Result, VaultError};

/// Lowest PBKDF2 iteration count accepted from a config file.
pub const MIN_PBKDF2_ITERATIONS: u32 = 100_000;

/// Project-level configuration, loaded from `.smartcv-vault.toml`.
///
/// Every field has a sensible default so the vault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to project root) where the blob is stored.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Key the encrypted blob is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// How long an unlocked session lasts, in minutes (default: 30).
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: u32,

    /// PBKDF2-HMAC-SHA256 iteration count for new blobs (default: 100 000).
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_storage_dir() -> String {
    ".smartcv".to_string()
}

fn default_storage_key() -> String {
    "smartcv_vault".to_string()
}

fn default_session_ttl_minutes() -> u32 {
    30
}

fn default_pbkdf2_iterations() -> u32 {
    PBKDF2_ITERATIONS
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            storage_key: default_storage_key(),
            session_ttl_minutes: default_session_ttl_minutes(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".smartcv-vault.toml";

    /// Load settings from `<project_dir>/.smartcv-vault.toml`.
    ///
    /// If the file does not exist, defaults are returned.  If it exists
    /// but cannot be parsed or holds out-of-range values, an error is
    /// returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would weaken the vault or make it unusable.
    pub fn validate(&self) -> Result<()> {
        if self.session_ttl_minutes < 1 {
            return Err(VaultError::ConfigError(
                "session_ttl_minutes must be at least 1".into(),
            ));
        }
        if self.pbkdf2_iterations < MIN_PBKDF2_ITERATIONS {
            return Err(VaultError::ConfigError(format!(
                "pbkdf2_iterations must be at least {MIN_PBKDF2_ITERATIONS} (got {})",
                self.pbkdf2_iterations
            )));
        }
        crate::vault::store::validate_storage_key(&self.storage_key)
            .map_err(|e| VaultError::ConfigError(e.to_string()))
    }

    /// Directory holding the blob.
    ///
    /// Example: `project_dir/.smartcv`
    pub fn storage_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.storage_dir)
    }

    /// Session lifetime as a `chrono` duration.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.session_ttl_minutes))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
