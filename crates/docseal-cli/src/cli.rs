use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docseal")]
#[command(about = "Redact infrastructure manifests and publish them as Markdown", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: docseal.toml in this or a parent directory)
    #[arg(long, global = true, env = "DOCSEAL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy Markdown and redacted copies of every file it links to
    Redact {
        /// Documentation directory to scan
        in_dir: PathBuf,

        /// Output directory (created if missing)
        out_dir: PathBuf,

        /// Report what would be published without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert every file into a Markdown page for the site generator
    #[command(alias = "to-markdown")]
    Convert {
        /// Directory to convert
        in_dir: PathBuf,

        /// Output directory (created if missing)
        out_dir: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_redact() {
        let cli = Cli::parse_from(["docseal", "redact", "docs", "out", "--dry-run"]);
        match cli.command {
            Commands::Redact {
                in_dir,
                out_dir,
                dry_run,
                json,
            } => {
                assert_eq!(in_dir, PathBuf::from("docs"));
                assert_eq!(out_dir, PathBuf::from("out"));
                assert!(dry_run);
                assert!(!json);
            }
            _ => panic!("expected redact"),
        }
    }

    #[test]
    fn test_to_markdown_alias() {
        let cli = Cli::parse_from(["docseal", "--config", "x.toml", "to-markdown", "a", "b"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Commands::Convert { .. }));
    }
}
