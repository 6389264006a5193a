//! Secret redaction for published manifests

pub mod redactor;
pub mod rules;

pub use redactor::{DEFAULT_PLACEHOLDER, Redactor, RedactorOptions};
pub use rules::{RedactionRule, SecretDetector};
