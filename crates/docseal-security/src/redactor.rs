//! Line based redaction engine

use std::collections::BTreeMap;

use docseal_core::{ManifestFile, ManifestFormat, RedactionInfo, Result};
use docseal_tokens::TokenEstimator;

use crate::rules::{RedactionRule, SECRET_LENGTH_REQUIREMENT, SecretDetector, is_block_marker};

pub const DEFAULT_PLACEHOLDER: &str = "REDACTED";

/// Characters trimmed around a value before it is classified
const VALUE_TRIM: &[char] = &[' ', '\t', '\n', '\r', '"', '\'', ','];

/// Options for building a [`Redactor`]
#[derive(Debug, Clone)]
pub struct RedactorOptions {
    pub placeholder: String,
    pub min_secret_length: usize,
    pub extra_key_hints: Vec<String>,
}

impl Default for RedactorOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            min_secret_length: SECRET_LENGTH_REQUIREMENT,
            extra_key_hints: Vec::new(),
        }
    }
}

/// Heuristic redaction for YAML and Terraform manifests
///
/// Each line is split into key, separator and value. When the value looks
/// like a secret, everything after the separator is replaced by the
/// placeholder. This is not a security boundary: it can over- or
/// under-redact.
pub struct Redactor {
    detector: SecretDetector,
    placeholder: String,
}

impl Redactor {
    pub fn new() -> Result<Self> {
        Self::with_options(RedactorOptions::default())
    }

    pub fn with_options(options: RedactorOptions) -> Result<Self> {
        let estimator = TokenEstimator::new()?;
        let detector = SecretDetector::new(estimator)
            .with_min_secret_length(options.min_secret_length)
            .with_extra_hints(&options.extra_key_hints)?;

        Ok(Self {
            detector,
            placeholder: options.placeholder,
        })
    }

    /// Redact secrets from content
    pub fn redact(
        &self,
        path: &str,
        content: &str,
        format: ManifestFormat,
    ) -> (String, Vec<RedactionInfo>) {
        let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut result = String::with_capacity(content.len());
        let mut block: Option<SecretBlock> = None;

        for line in content.split_inclusive('\n') {
            if let Some(open) = block.as_mut() {
                if let Some(redacted) = self.redact_block_line(line, open) {
                    result.push_str(&redacted);
                    continue;
                }
                if block.take().is_some_and(|b| b.redacted) {
                    *counts.entry(RedactionRule::KeyHint.name()).or_default() += 1;
                }
            }

            if let Some(indent) = self.opens_secret_block(line) {
                block = Some(SecretBlock {
                    indent,
                    redacted: false,
                });
                result.push_str(line);
                continue;
            }

            match self.redact_line(line, format) {
                Some((redacted, rule)) => {
                    result.push_str(&redacted);
                    *counts.entry(rule).or_default() += 1;
                }
                None => result.push_str(line),
            }
        }

        if block.is_some_and(|b| b.redacted) {
            *counts.entry(RedactionRule::KeyHint.name()).or_default() += 1;
        }

        let redactions = counts
            .into_iter()
            .map(|(redaction_type, count)| RedactionInfo {
                path: path.to_string(),
                redaction_type: redaction_type.to_string(),
                count,
            })
            .collect();

        (result, redactions)
    }

    pub fn redact_file(&self, file: ManifestFile) -> (ManifestFile, Vec<RedactionInfo>) {
        let (content, redactions) = self.redact(&file.path, &file.content, file.format);
        (file.with_content(content), redactions)
    }

    /// Indentation of a `hinted_key: |` line whose secret follows as a block scalar
    fn opens_secret_block(&self, line: &str) -> Option<usize> {
        let (body, _) = split_line_ending(line);
        if body.trim_start().starts_with('#') {
            return None;
        }

        let (key, value) = body.split_once(':')?;
        let header = value
            .split_once('#')
            .map_or(value, |(before, _)| before)
            .trim();

        (is_block_marker(header) && self.detector.is_hinted_key(key)).then(|| indentation(body))
    }

    /// Lines indented deeper than the block header belong to the secret.
    /// Blank lines inside the block are kept; `None` ends the block.
    fn redact_block_line(&self, line: &str, block: &mut SecretBlock) -> Option<String> {
        let (body, eol) = split_line_ending(line);
        if body.trim().is_empty() {
            return Some(line.to_string());
        }

        let indent = indentation(body);
        if indent <= block.indent {
            return None;
        }

        if &body[indent..] != self.placeholder {
            block.redacted = true;
        }
        Some(format!("{}{}{eol}", &body[..indent], self.placeholder))
    }

    /// Redacted line and the name of the rule that fired, `None` if untouched
    fn redact_line(&self, line: &str, format: ManifestFormat) -> Option<(String, &'static str)> {
        let (body, eol) = split_line_ending(line);

        if body.trim_start().starts_with('#') {
            return None;
        }

        let preferred = format.preferred_separator();
        let sep = [preferred, '=', ':']
            .into_iter()
            .find(|sep| body.contains(*sep))?;

        let (key, value) = body.split_once(sep)?;
        if key.is_empty() || value.is_empty() {
            return None;
        }

        let candidate = value
            .split_once('#')
            .map_or(value, |(before, _)| before)
            .trim_matches(VALUE_TRIM);

        if candidate == self.placeholder {
            return None;
        }

        let rule = self.detector.classify(key, candidate)?;
        let space = if value.starts_with(' ') { " " } else { "" };

        Some((
            format!("{key}{sep}{space}{}{eol}", self.placeholder),
            rule.name(),
        ))
    }
}

/// An open YAML block scalar under a hinted key
struct SecretBlock {
    indent: usize,
    redacted: bool,
}

fn indentation(body: &str) -> usize {
    body.len() - body.trim_start_matches([' ', '\t']).len()
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
