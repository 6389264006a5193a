use anyhow::{Context, Result};
use docseal_config::Config;
use docseal_engine::Converter;
use std::path::Path;

use super::plural;

pub fn handle(config: &Config, in_dir: &Path, out_dir: &Path, json: bool) -> Result<()> {
    let converter = Converter::from_config(config);
    let report = converter
        .convert_tree(in_dir, out_dir)
        .with_context(|| format!("Failed to convert {}", in_dir.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "✓ Converted {} into {}",
        plural("page", report.pages.len()),
        out_dir.display()
    );

    Ok(())
}
