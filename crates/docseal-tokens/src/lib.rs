use std::sync::Arc;
use tiktoken_rs::CoreBPE;

/// Token counter using tiktoken (cl100k_base encoding)
///
/// Random strings split into many short tokens while words and hostnames
/// compress into few, which makes the token-per-character ratio a cheap
/// randomness signal.
#[derive(Clone)]
pub struct TokenEstimator {
    bpe: Arc<CoreBPE>,
}

impl TokenEstimator {
    /// Create new estimator with cl100k_base encoding (GPT-4, GPT-3.5-turbo)
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            bpe: Arc::new(tiktoken_rs::cl100k_base()?),
        })
    }

    /// Token count for a single string
    pub fn estimate(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_estimation() {
        let estimator = TokenEstimator::new().unwrap();

        let count = estimator.estimate("Hello, world!");
        assert!(count > 0 && count < 10);

        assert_eq!(estimator.estimate(""), 0);
    }

    #[test]
    fn test_random_text_is_denser() {
        let estimator = TokenEstimator::new().unwrap();

        let words = "configuration.example.com";
        let random = "qFWAPxEkKkqZ9i9QLa";
        assert_eq!(words.len(), random.len() + 7);
        assert!(estimator.estimate(random) > estimator.estimate(words));
    }
}
