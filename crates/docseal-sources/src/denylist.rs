use docseal_core::{Error, Result};
use glob::Pattern;

/// Glob patterns for files that are never published, even when linked
pub struct Denylist {
    patterns: Vec<Pattern>,
}

impl Denylist {
    /// Compile deny patterns; an invalid pattern is an error
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref())
                    .map_err(|e| Error::InvalidPattern(format!("{}: {}", p.as_ref(), e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// A denylist that allows everything
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Check if a relative path matches any deny pattern
    pub fn is_denied(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(path))
    }

    /// Get first matching pattern (for reports)
    pub fn matching_pattern(&self, path: &str) -> Option<String> {
        self.patterns
            .iter()
            .find(|p| p.matches(path))
            .map(|p| p.as_str().to_string())
    }
}
