//! `smartcv-vault status` — show whether a vault exists.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (vault, dir) = open_vault(cli)?;
    output::print_status_table(&vault, &dir);
    Ok(())
}
