//! Core domain models and logic for docseal
//!
//! This crate contains:
//! - Domain models (ManifestFile, ReferenceSet, reports)
//! - Markdown converter (front matter and fenced code pages)
//! - Shared error type

pub mod error;
pub mod manifest;
pub mod render;
pub mod report;

pub use error::{Error, Result};
pub use manifest::{ManifestFile, ManifestFormat, ReferenceSet};
pub use render::{MarkdownConverter, RenderedPage};
pub use report::{ConvertReport, RedactReport, RedactionInfo, SkipReason, SkippedReference};
