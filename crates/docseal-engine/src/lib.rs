//! Batch passes over a documentation tree
//!
//! - [`Publisher`]: copy Markdown and write redacted copies of linked files
//! - [`Converter`]: turn every file of a tree into a static site page

pub mod convert;
pub mod publish;

use std::path::{Path, PathBuf};

use docseal_core::{Error, Result};

pub use convert::Converter;
pub use publish::Publisher;

/// Write `text` to `out_dir/relative`, creating parent directories
pub fn write_output(out_dir: &Path, relative: &str, text: &str) -> Result<PathBuf> {
    let path = out_dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(&path, text).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
