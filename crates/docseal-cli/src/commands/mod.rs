pub mod completions;
pub mod convert;
pub mod redact;

/// "1 secret", "2 secrets"
pub fn plural(word: &str, count: usize) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}
