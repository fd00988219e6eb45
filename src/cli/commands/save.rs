//! `smartcv-vault save` — encrypt and store the API key.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, prompt_new_password, surfaced_error, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `save` command.
pub fn execute(cli: &Cli, key: Option<&str>) -> Result<()> {
    let api_key = read_api_key(key)?;

    let (mut vault, dir) = open_vault(cli)?;
    if vault.status().has_vault {
        output::warning("Replacing the existing vault.");
    }

    let password = prompt_new_password()?;
    if let Err(e) = vault.save_key(&api_key, &password) {
        return Err(surfaced_error(&vault, e));
    }

    output::success(&format!("API key encrypted and stored in {}", dir.display()));
    output::tip("Run `smartcv-vault get` to unlock it later.");

    Ok(())
}

/// Determine the API key from one of three sources.
fn read_api_key(key: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(k) = key {
        // Source 1: Inline value on the command line.
        output::warning("Key provided on command line — it may appear in shell history.");
        return Ok(Zeroizing::new(k.to_string()));
    }

    if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Zeroizing::new(buf.trim_end().to_string()));
    }

    // Source 3: Interactive secure prompt (default).
    let k = dialoguer::Password::new()
        .with_prompt("Enter API key")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(k))
}
