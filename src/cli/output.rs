//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{Vault, VaultState};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print the vault status as a two-column table.
pub fn print_status_table(vault: &Vault, storage_dir: &Path) {
    let status = vault.status();
    let state = vault.state();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec![
        "Vault".to_string(),
        if status.has_vault { "present" } else { "none" }.to_string(),
    ]);
    table.add_row(vec!["State".to_string(), state.to_string()]);
    table.add_row(vec![
        "Storage".to_string(),
        storage_dir
            .join(format!("{}.json", vault.storage_key()))
            .display()
            .to_string(),
    ]);
    if let Some(expires_at) = vault.session_expires_at() {
        table.add_row(vec![
            "Expires".to_string(),
            expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ]);
    }
    if let Some(err) = &status.error {
        table.add_row(vec!["Last error".to_string(), err.clone()]);
    }

    println!("{table}");

    match state {
        VaultState::NoVault => tip("Run `smartcv-vault save` to store your API key."),
        VaultState::Locked => tip("Run `smartcv-vault get` to unlock and print the key."),
        VaultState::Unlocked => {}
    }
}
