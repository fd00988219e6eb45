use clap::Parser;
use tracing_subscriber::EnvFilter;

use smartcv_vault::cli::{Cli, Commands};

fn main() {
    // RUST_LOG=smartcv_vault=debug for verbose output.  Events never carry
    // the key or the password.  Logs go to stderr so `get` stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("smartcv_vault=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Save { ref key } => {
            smartcv_vault::cli::commands::save::execute(&cli, key.as_deref())
        }
        Commands::Get { header } => smartcv_vault::cli::commands::get::execute(&cli, header),
        Commands::Status => smartcv_vault::cli::commands::status::execute(&cli),
        Commands::Clear { force } => smartcv_vault::cli::commands::clear::execute(&cli, force),
        Commands::Shell => smartcv_vault::cli::commands::shell::execute(&cli),
    };

    if let Err(e) = result {
        smartcv_vault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
