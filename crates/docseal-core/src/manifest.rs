//! Manifest domain model

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Relative, `/`-separated paths of every file linked from the documentation.
///
/// A `BTreeSet` keeps iteration lexicographic so batch passes are deterministic.
pub type ReferenceSet = BTreeSet<String>;

/// Format of a published file, detected from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestFormat {
    Yaml,
    Terraform,
    Markdown,
    Other,
}

impl ManifestFormat {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match extension(path.as_ref()).as_str() {
            "yaml" | "yml" => Self::Yaml,
            "tf" | "tfvars" | "hcl" => Self::Terraform,
            "md" | "markdown" => Self::Markdown,
            _ => Self::Other,
        }
    }

    /// Key/value separator tried first when splitting a line
    pub fn preferred_separator(self) -> char {
        match self {
            Self::Yaml => ':',
            _ => '=',
        }
    }
}

/// A file referenced from the documentation, loaded for redaction
#[derive(Debug, Clone)]
pub struct ManifestFile {
    /// Path relative to the input directory
    pub path: String,
    pub content: String,
    pub format: ManifestFormat,
}

impl ManifestFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            format: ManifestFormat::from_path(&path),
            path,
            content: content.into(),
        }
    }

    /// Read `relative` from below `base`
    pub fn load(base: &Path, relative: &str) -> Result<Self> {
        let full = base.join(relative);
        let content = std::fs::read_to_string(&full).map_err(|source| Error::Read {
            path: full.clone(),
            source,
        })?;
        Ok(Self::new(relative, content))
    }

    pub fn with_content(mut self, content: String) -> Self {
        self.content = content;
        self
    }
}

/// Lowercased extension without the dot, empty when there is none
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(ManifestFormat::from_path("k8s/deploy.yaml"), ManifestFormat::Yaml);
        assert_eq!(ManifestFormat::from_path("k8s/deploy.YML"), ManifestFormat::Yaml);
        assert_eq!(ManifestFormat::from_path("infra/main.tf"), ManifestFormat::Terraform);
        assert_eq!(ManifestFormat::from_path("prod.tfvars"), ManifestFormat::Terraform);
        assert_eq!(ManifestFormat::from_path("README.md"), ManifestFormat::Markdown);
        assert_eq!(ManifestFormat::from_path("Makefile"), ManifestFormat::Other);
    }

    #[test]
    fn test_preferred_separator() {
        assert_eq!(ManifestFormat::Yaml.preferred_separator(), ':');
        assert_eq!(ManifestFormat::Terraform.preferred_separator(), '=');
        assert_eq!(ManifestFormat::Other.preferred_separator(), '=');
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ManifestFile::load(dir.path(), "nope.yaml").unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_load_non_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blob.yaml"), [0xff, 0xfe, 0x00]).unwrap();

        let err = ManifestFile::load(dir.path(), "blob.yaml").unwrap_err();
        match err {
            Error::Read { path, source } => {
                assert_eq!(path, dir.path().join("blob.yaml"));
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_detects_format() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("infra")).unwrap();
        std::fs::write(dir.path().join("infra/main.tf"), "region = \"eu\"\n").unwrap();

        let file = ManifestFile::load(dir.path(), "infra/main.tf").unwrap();
        assert_eq!(file.path, "infra/main.tf");
        assert_eq!(file.format, ManifestFormat::Terraform);
        assert_eq!(file.content, "region = \"eu\"\n");
    }
}
