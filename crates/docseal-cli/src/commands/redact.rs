use anyhow::{Context, Result};
use docseal_config::Config;
use docseal_core::{RedactReport, SkipReason};
use docseal_engine::Publisher;
use std::path::Path;
use tracing::info;

use super::plural;

pub fn handle(
    config: &Config,
    in_dir: &Path,
    out_dir: &Path,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let publisher = Publisher::from_config(config)?;
    let report = publisher
        .redact_tree(in_dir, out_dir, dry_run)
        .with_context(|| format!("Failed to redact {}", in_dir.display()))?;

    info!(
        published = report.published.len(),
        skipped = report.skipped.len(),
        secrets = report.secrets_redacted(),
        dry_run,
        "Redact pass finished"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, out_dir);
    }

    Ok(())
}

fn print_report(report: &RedactReport, out_dir: &Path) {
    let verb = if report.dry_run { "Would publish" } else { "Published" };

    println!(
        "✓ Scanned {}, found {}",
        plural("markdown file", report.markdown_files),
        plural("link", report.links_found)
    );
    println!(
        "✓ {} {} to {}, redacted {}",
        verb,
        plural("file", report.published.len()),
        out_dir.display(),
        plural("secret", report.secrets_redacted())
    );

    for path in &report.published {
        println!("  {} ({})", path, plural("secret", report.secrets_in(path)));
    }

    if !report.skipped.is_empty() {
        println!("\nSkipped ({}):", report.skipped.len());
        for skipped in &report.skipped {
            let reason = match &skipped.reason {
                SkipReason::Missing => "not found".to_string(),
                SkipReason::NotAFile => "not a file".to_string(),
                SkipReason::Denied { pattern } => format!("denied by '{}'", pattern),
            };
            println!("  - {} ({})", skipped.path, reason);
        }
    }
}
