//! One module per subcommand.

pub mod clear;
pub mod get;
pub mod save;
pub mod shell;
pub mod status;
