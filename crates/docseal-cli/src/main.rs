mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use docseal_config::Config;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
        cli::Commands::Redact {
            in_dir,
            out_dir,
            dry_run,
            json,
        } => {
            let config = Config::load(cli.config.as_deref())?;
            commands::redact::handle(&config, &in_dir, &out_dir, dry_run, json)
        }
        cli::Commands::Convert {
            in_dir,
            out_dir,
            json,
        } => {
            let config = Config::load(cli.config.as_deref())?;
            commands::convert::handle(&config, &in_dir, &out_dir, json)
        }
    }
}
