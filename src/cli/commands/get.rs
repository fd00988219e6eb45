//! `smartcv-vault get` — unlock the vault and print the API key.

use crate::api::backend_auth;
use crate::cli::{open_vault, prompt_password, surfaced_error, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `get` command.
pub fn execute(cli: &Cli, header: bool) -> Result<()> {
    let (mut vault, _dir) = open_vault(cli)?;

    // A fresh process never has a session, so always unlock.
    let password = prompt_password()?;
    if let Err(e) = vault.unlock_vault(&password) {
        return Err(surfaced_error(&vault, e));
    }

    if header {
        let line = backend_auth(&mut vault)
            .header_line()
            .ok_or_else(|| VaultError::CommandFailed("vault locked".into()))?;
        println!("{line}");
    } else {
        let key = vault
            .get_key()
            .ok_or_else(|| VaultError::CommandFailed("vault locked".into()))?;
        println!("{key}");
    }

    Ok(())
}
