use std::io::ErrorKind;
use std::path::Path;

use docseal_config::Config;
use docseal_core::{Error, ManifestFile, RedactReport, Result, SkipReason, SkippedReference};
use docseal_security::{Redactor, RedactorOptions};
use docseal_sources::{Denylist, ReferenceScanner};
use tracing::{debug, info, warn};

use crate::write_output;

/// Copies Markdown and publishes redacted copies of every linked file
pub struct Publisher {
    scanner: ReferenceScanner,
    redactor: Redactor,
}

impl Publisher {
    pub fn new(scanner: ReferenceScanner, redactor: Redactor) -> Self {
        Self { scanner, redactor }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let denylist = Denylist::new(&config.denylist.patterns)?;
        let redactor = Redactor::with_options(RedactorOptions {
            placeholder: config.redaction.placeholder.clone(),
            min_secret_length: config.redaction.min_secret_length,
            extra_key_hints: config.redaction.extra_key_hints.clone(),
        })?;

        Ok(Self::new(ReferenceScanner::new(denylist), redactor))
    }

    /// Run the redact pass from `in_dir` into `out_dir`
    ///
    /// Files that are not linked from any Markdown file are never written.
    /// With `dry_run` nothing is written at all.
    pub fn redact_tree(
        &self,
        in_dir: &Path,
        out_dir: &Path,
        dry_run: bool,
    ) -> Result<RedactReport> {
        let scan = self.scanner.scan(in_dir)?;
        info!(
            "Scanned {} markdown files, {} links to {} files",
            scan.markdown_files.len(),
            scan.links_found,
            scan.references.len()
        );

        let mut report = RedactReport {
            markdown_files: scan.markdown_files.len(),
            links_found: scan.links_found,
            skipped: scan.denied,
            dry_run,
            ..Default::default()
        };

        if !dry_run {
            for md_file in &scan.markdown_files {
                let file = ManifestFile::load(&scan.root, md_file)?;
                write_output(out_dir, &file.path, &file.content)?;
                debug!("Copied {}", md_file);
            }
        }

        for path in &scan.references {
            if let Some(reason) = unpublishable(&scan.root.join(path))? {
                warn!("Skipping {}: {:?}", path, reason);
                report.skipped.push(SkippedReference {
                    path: path.clone(),
                    reason,
                });
                continue;
            }

            let (file, redactions) = self
                .redactor
                .redact_file(ManifestFile::load(&scan.root, path)?);

            let secrets: usize = redactions.iter().map(|r| r.count).sum();
            info!("Redacted {} secrets in {}", secrets, path);

            if !dry_run {
                write_output(out_dir, &file.path, &file.content)?;
            }

            report.published.push(file.path);
            report.redactions.extend(redactions);
        }

        Ok(report)
    }
}

/// Broken links and directories are skipped rather than failing the pass
fn unpublishable(path: &Path) -> Result<Option<SkipReason>> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(None),
        Ok(_) => Ok(Some(SkipReason::NotAFile)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Some(SkipReason::Missing)),
        Err(source) => Err(Error::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
