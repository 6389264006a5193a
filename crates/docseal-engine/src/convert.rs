use std::path::Path;

use docseal_config::Config;
use docseal_core::{ConvertReport, ManifestFile, MarkdownConverter, Result};
use docseal_sources::{all_files, canonical_dir};
use tracing::debug;

use crate::write_output;

/// Converts every file of a tree into a Markdown page
pub struct Converter {
    converter: MarkdownConverter,
}

impl Converter {
    pub fn new(converter: MarkdownConverter) -> Self {
        Self { converter }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(MarkdownConverter::new().with_languages(config.render.languages.clone()))
    }

    /// Run the convert pass from `in_dir` into `out_dir`
    pub fn convert_tree(&self, in_dir: &Path, out_dir: &Path) -> Result<ConvertReport> {
        let root = canonical_dir(in_dir)?;
        let mut report = ConvertReport::default();

        for path in all_files(&root)? {
            let file = ManifestFile::load(&root, &path)?;
            let page = self.converter.convert(&file.path, &file.content);

            write_output(out_dir, &page.path, &page.text)?;
            debug!("Converted {} -> {}", path, page.path);
            report.pages.push(page.path);
        }

        Ok(report)
    }
}
