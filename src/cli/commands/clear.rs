//! `smartcv-vault clear` — delete the stored vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_vault, surfaced_error, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `clear` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let (mut vault, _dir) = open_vault(cli)?;

    if !vault.status().has_vault {
        output::info("No vault to clear.");
        return Ok(());
    }

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt("Delete the stored API key? This cannot be undone.")
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    if let Err(e) = vault.clear_vault() {
        return Err(surfaced_error(&vault, e));
    }

    output::success("Vault cleared.");
    Ok(())
}
