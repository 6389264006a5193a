//! Batch pass reports

use serde::{Deserialize, Serialize};

/// Values redacted by one rule within one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionInfo {
    pub path: String,
    pub redaction_type: String,
    pub count: usize,
}

/// Why a referenced file was not published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Broken link
    Missing,
    NotAFile,
    Denied { pattern: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedReference {
    pub path: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Outcome of a redact pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactReport {
    pub markdown_files: usize,
    pub links_found: usize,
    /// Referenced files written (or that would be written on a dry run)
    pub published: Vec<String>,
    pub redactions: Vec<RedactionInfo>,
    pub skipped: Vec<SkippedReference>,
    #[serde(default)]
    pub dry_run: bool,
}

impl RedactReport {
    pub fn secrets_redacted(&self) -> usize {
        self.redactions.iter().map(|r| r.count).sum()
    }

    /// Secrets redacted in a single published file
    pub fn secrets_in(&self, path: &str) -> usize {
        self.redactions
            .iter()
            .filter(|r| r.path == path)
            .map(|r| r.count)
            .sum()
    }
}

/// Outcome of a convert pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertReport {
    /// Output page paths, relative to the output directory
    pub pages: Vec<String>,
}
