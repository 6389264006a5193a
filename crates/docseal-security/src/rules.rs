//! Secret detection rules
//!
//! Rules are evaluated in a fixed order and the first match wins:
//! key hints, then well-known value shapes, then random-looking values.

use docseal_core::{Error, Result};
use docseal_tokens::TokenEstimator;
use lazy_static::lazy_static;
use regex::Regex;

/// Values of at least this many characters containing a digit may be secrets
pub const SECRET_LENGTH_REQUIREMENT: usize = 10;

lazy_static! {
    static ref KEY_HINT: Regex = Regex::new(
        r"(?i)(?:^|[^a-z0-9])(?:password|passwd|passphrase|pwd|secrets?|tokens?|api[_-]?keys?|access[_-]?keys?|private[_-]?keys?|credentials?)(?:$|[^a-z0-9])"
    )
    .unwrap();

    static ref CAMEL_BOUNDARY: Regex = Regex::new(r"([a-z0-9])([A-Z])").unwrap();

    // Order matters - more specific first
    static ref VALUE_SHAPES: Vec<(&'static str, Regex)> = vec![
        ("AWS_ACCESS_KEY", Regex::new(r"(?:A3T[A-Z0-9]|AKIA|ASIA)[0-9A-Z]{16}").unwrap()),
        ("PRIVATE_KEY", Regex::new(r"-----BEGIN[A-Z ]*PRIVATE KEY-----").unwrap()),
        ("GITHUB_TOKEN", Regex::new(r"gh[pousr]_[a-zA-Z0-9]{36,}").unwrap()),
        ("JWT", Regex::new(r"eyJ[a-zA-Z0-9_-]+\.eyJ[a-zA-Z0-9_-]+\.[a-zA-Z0-9_-]+").unwrap()),
        ("BEARER_TOKEN", Regex::new(r"(?i)bearer\s+[a-zA-Z0-9_.\-]{20,}").unwrap()),
    ];
}

/// Values a hinted key may hold without leaking anything
const TRIVIAL_VALUES: &[&str] = &["true", "false", "null", "~", "{}", "[]"];

/// YAML block scalar headers; the value itself sits on the lines below
const BLOCK_MARKERS: &[&str] = &["|", ">", "|-", ">-", "|+", ">+"];

/// The rule that classified a value as a secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedactionRule {
    KeyHint,
    ValueShape(&'static str),
    RandomValue,
}

impl RedactionRule {
    pub fn name(&self) -> &'static str {
        match *self {
            Self::KeyHint => "KEY_HINT",
            Self::ValueShape(name) => name,
            Self::RandomValue => "RANDOM_VALUE",
        }
    }
}

/// Decides whether a key/value pair holds a secret
pub struct SecretDetector {
    estimator: TokenEstimator,
    extra_hints: Option<Regex>,
    min_secret_length: usize,
}

impl SecretDetector {
    pub fn new(estimator: TokenEstimator) -> Self {
        Self {
            estimator,
            extra_hints: None,
            min_secret_length: SECRET_LENGTH_REQUIREMENT,
        }
    }

    pub fn with_min_secret_length(mut self, length: usize) -> Self {
        self.min_secret_length = length;
        self
    }

    /// Additional key words, matched like the built-in hints
    pub fn with_extra_hints(mut self, hints: &[String]) -> Result<Self> {
        let alternation: Vec<String> = hints
            .iter()
            .map(|h| h.trim())
            .filter(|h| !h.is_empty())
            .map(regex::escape)
            .collect();

        self.extra_hints = if alternation.is_empty() {
            None
        } else {
            let pattern = format!(
                r"(?i)(?:^|[^a-z0-9])(?:{})(?:$|[^a-z0-9])",
                alternation.join("|")
            );
            Some(Regex::new(&pattern).map_err(|e| Error::InvalidPattern(e.to_string()))?)
        };
        Ok(self)
    }

    /// Classify a value, `None` when it should be left alone
    pub fn classify(&self, key: &str, value: &str) -> Option<RedactionRule> {
        if value.is_empty() || is_block_marker(value) {
            return None;
        }

        if self.is_hinted_key(key) {
            return (!is_trivial(value)).then_some(RedactionRule::KeyHint);
        }

        if let Some((name, _)) = VALUE_SHAPES.iter().find(|(_, re)| re.is_match(value)) {
            return Some(RedactionRule::ValueShape(*name));
        }

        self.looks_random(value).then_some(RedactionRule::RandomValue)
    }

    /// Key hints match whole words after splitting camelCase
    pub fn is_hinted_key(&self, key: &str) -> bool {
        let key = CAMEL_BOUNDARY.replace_all(key, "${1}_${2}");
        KEY_HINT.is_match(&key) || self.extra_hints.as_ref().is_some_and(|re| re.is_match(&key))
    }

    /// A digit somewhere and long enough to be worth guessing
    pub fn meets_minimum(&self, value: &str) -> bool {
        value.chars().any(|c| c.is_ascii_digit()) && value.chars().count() >= self.min_secret_length
    }

    /// Random-looking by token density; space-separated parts are checked on their own
    pub fn looks_random(&self, value: &str) -> bool {
        if value.contains(' ') {
            return value.split(' ').any(|part| self.looks_random(part));
        }

        let len = value.chars().count() as f64;
        let tokens = self.estimator.estimate(value) as f64;

        (self.meets_minimum(value) && tokens > len * 0.6)
            || (tokens > len * 0.45 && len * 0.45 > 12.0)
    }
}

pub fn is_block_marker(value: &str) -> bool {
    BLOCK_MARKERS.contains(&value)
}

fn is_trivial(value: &str) -> bool {
    TRIVIAL_VALUES.iter().any(|t| value.eq_ignore_ascii_case(t))
}
