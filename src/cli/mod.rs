//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::{FileStore, Vault};

/// Environment variable consulted before prompting for the vault password.
pub const PASSWORD_ENV: &str = "SMARTCV_VAULT_PASSWORD";

/// SmartCV vault: keeps the model API key encrypted on disk.
#[derive(Parser)]
#[command(
    name = "smartcv-vault",
    about = "Password-protected vault for your model API key",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (overrides `storage_dir` from .smartcv-vault.toml)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt and store the API key (replaces any existing vault)
    Save {
        /// API key (omit for interactive prompt or piped stdin)
        key: Option<String>,
    },

    /// Unlock the vault and print the API key
    Get {
        /// Print the backend request header instead of the bare key
        #[arg(long)]
        header: bool,
    },

    /// Show whether a vault exists and where it lives
    Status,

    /// Delete the stored vault
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Interactive session that keeps the vault unlocked in memory
    Shell,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from the current directory, applying `--vault-dir`.
pub fn load_settings(cli: &Cli) -> Result<(PathBuf, Settings)> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;
    if let Some(dir) = &cli.vault_dir {
        settings.storage_dir = dir.clone();
    }
    Ok((cwd, settings))
}

/// Open the file-backed vault described by the CLI arguments.
///
/// Returns the vault and the directory its blob lives in.
pub fn open_vault(cli: &Cli) -> Result<(Vault, PathBuf)> {
    let (cwd, settings) = load_settings(cli)?;
    let dir = settings.storage_path(&cwd);
    let vault = Vault::open(FileStore::new(&dir), &settings)?;
    Ok((vault, dir))
}

/// Get the vault password, trying in order:
/// 1. `SMARTCV_VAULT_PASSWORD` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used by `save`).
///
/// Also respects `SMARTCV_VAULT_PASSWORD` for scripted/CI usage.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose vault password")
            .with_confirmation(
                "Confirm vault password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.is_empty() {
            output::warning("Password cannot be empty. Try again.");
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Turn a failed vault operation into the message the vault surfaced
/// for it ("Incorrect password.", "No vault found.", ...).
pub fn surfaced_error(vault: &Vault, err: VaultError) -> VaultError {
    match vault.status().error {
        Some(msg) => VaultError::CommandFailed(msg),
        None => err,
    }
}
