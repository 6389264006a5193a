//! Reference scanner - finds the files a documentation tree links to

use std::path::{Path, PathBuf};

use docseal_core::{Error, ReferenceSet, Result, SkipReason, SkippedReference};
use tracing::debug;

use crate::denylist::Denylist;
use crate::links::{as_file_destination, link_destinations, slash_path};

/// Result of scanning a documentation tree
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Canonical input directory
    pub root: PathBuf,
    /// Markdown files, relative to `root`, sorted
    pub markdown_files: Vec<String>,
    /// Links that resolved to a path inside `root`
    pub links_found: usize,
    pub references: ReferenceSet,
    pub denied: Vec<SkippedReference>,
}

pub struct ReferenceScanner {
    denylist: Denylist,
}

impl ReferenceScanner {
    pub fn new(denylist: Denylist) -> Self {
        Self { denylist }
    }

    /// Collect every file linked from a Markdown file below `root`
    pub fn scan(&self, root: &Path) -> Result<ScanResult> {
        let root = canonical_dir(root)?;
        let markdown_files = markdown_files(&root)?;

        let mut links_found = 0;
        let mut referenced = ReferenceSet::new();

        for md_file in &markdown_files {
            let full = root.join(md_file);
            let text = std::fs::read_to_string(&full).map_err(|source| Error::Read {
                path: full.clone(),
                source,
            })?;

            let targets: Vec<String> = link_destinations(&text)
                .iter()
                .filter_map(|dest| as_file_destination(dest, Path::new(md_file), &root))
                .collect();

            debug!("Found {} links in {}", targets.len(), md_file);
            links_found += targets.len();
            referenced.extend(targets);
        }

        let mut references = ReferenceSet::new();
        let mut denied = Vec::new();
        for path in referenced {
            match self.denylist.matching_pattern(&path) {
                Some(pattern) => {
                    debug!("Reference {} denied by {}", path, pattern);
                    denied.push(SkippedReference {
                        path,
                        reason: SkipReason::Denied { pattern },
                    });
                }
                None => {
                    references.insert(path);
                }
            }
        }

        Ok(ScanResult {
            root,
            markdown_files,
            links_found,
            references,
            denied,
        })
    }
}

/// Resolve `root` to an absolute directory, failing when it is missing
pub fn canonical_dir(root: &Path) -> Result<PathBuf> {
    match std::fs::canonicalize(root) {
        Ok(path) if path.is_dir() => Ok(path),
        _ => Err(Error::MissingInput(root.to_path_buf())),
    }
}

/// Markdown files below `root`, relative and sorted
pub fn markdown_files(root: &Path) -> Result<Vec<String>> {
    Ok(all_files(root)?
        .into_iter()
        .filter(|path| path.to_ascii_lowercase().ends_with(".md"))
        .collect())
}

/// Every regular file below `root`, relative and sorted
///
/// Hidden files and directories are skipped.
pub fn all_files(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = entry.map_err(|e| Error::Other(e.into()))?;
        if entry.file_type().is_file() {
            if let Ok(relative) = entry.path().strip_prefix(root) {
                files.push(slash_path(relative));
            }
        }
    }

    // Sort for determinism
    files.sort();

    Ok(files)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
