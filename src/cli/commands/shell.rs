//! `smartcv-vault shell` — an interactive session over one in-memory vault.
//!
//! This is the only place the session TTL matters: the vault stays
//! unlocked between commands until `lock`, `clear`, or expiry.

use dialoguer::Input;

use crate::api::backend_auth;
use crate::cli::output;
use crate::cli::{open_vault, prompt_new_password, prompt_password, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::Vault;

/// A parsed shell line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Status,
    Unlock,
    Get,
    Header,
    Lock,
    Save,
    Clear,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one line of input.  Blank lines and unknown words yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let cmd = match line.trim().to_ascii_lowercase().as_str() {
            "status" | "s" => Self::Status,
            "unlock" | "u" => Self::Unlock,
            "get" | "key" => Self::Get,
            "header" => Self::Header,
            "lock" | "l" => Self::Lock,
            "save" => Self::Save,
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return None,
        };
        Some(cmd)
    }
}

/// Execute the `shell` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (mut vault, dir) = open_vault(cli)?;

    output::info("Vault shell. Type `help` for commands, `quit` to leave.");

    loop {
        let line: String = Input::new()
            .with_prompt(format!("vault ({})", vault.state()))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;

        if line.trim().is_empty() {
            continue;
        }

        let Some(cmd) = ShellCommand::parse(&line) else {
            output::warning(&format!("Unknown command '{}'. Type `help`.", line.trim()));
            continue;
        };

        if cmd == ShellCommand::Quit {
            vault.lock_vault();
            return Ok(());
        }

        if cmd == ShellCommand::Status {
            vault.refresh()?;
            output::print_status_table(&vault, &dir);
            continue;
        }

        // Failures are reported and the shell keeps running.
        if let Err(e) = run(&mut vault, cmd) {
            let msg = vault.status().error.unwrap_or_else(|| e.to_string());
            output::error(&msg);
        }
    }
}

fn run(vault: &mut Vault, cmd: ShellCommand) -> Result<()> {
    match cmd {
        ShellCommand::Unlock => {
            let password = prompt_password()?;
            vault.unlock_vault(&password)?;
            output::success("Vault unlocked.");
        }
        ShellCommand::Get => match vault.get_key() {
            Some(key) => println!("{key}"),
            None => output::info("Vault is locked."),
        },
        ShellCommand::Header => match backend_auth(vault).header_line() {
            Some(line) => println!("{line}"),
            None => output::info("No key available; requests will use the local model."),
        },
        ShellCommand::Lock => {
            vault.lock_vault();
            output::success("Vault locked.");
        }
        ShellCommand::Save => {
            let key = dialoguer::Password::new()
                .with_prompt("Enter API key")
                .interact()
                .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?;
            let key = zeroize::Zeroizing::new(key);
            let password = prompt_new_password()?;
            vault.save_key(&key, &password)?;
            output::success("API key saved; vault unlocked.");
        }
        ShellCommand::Clear => {
            vault.clear_vault()?;
            output::success("Vault cleared.");
        }
        ShellCommand::Help => print_help(),
        ShellCommand::Status | ShellCommand::Quit => {}
    }
    Ok(())
}

fn print_help() {
    output::tip("status  show vault state");
    output::tip("unlock  decrypt the key into memory");
    output::tip("get     print the key (if unlocked)");
    output::tip("header  print the backend request header");
    output::tip("lock    forget the key");
    output::tip("save    store a new key");
    output::tip("clear   delete the stored vault");
    output::tip("quit    leave the shell");
}
