//! Constant similarity provider for tests and wiring checks.

use textchunk_core::AppResult;

use super::super::SimilarityProvider;

/// Returns the same score for every pair.
///
/// The constructor accepts any value so tests can exercise the out-of-range
/// handling of the semantic strategy; the provider factory only builds
/// in-range instances.
#[derive(Debug, Clone)]
pub struct ConstantProvider {
    score: f64,
}

impl ConstantProvider {
    pub fn new(score: f64) -> Self {
        Self { score }
    }
}

#[async_trait::async_trait]
impl SimilarityProvider for ConstantProvider {
    fn name(&self) -> &str {
        "constant"
    }

    async fn similarity(&self, _a: &str, _b: &str) -> AppResult<f64> {
        Ok(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_configured_score() {
        let provider = ConstantProvider::new(0.42);
        assert_eq!(provider.similarity("a", "b").await.unwrap(), 0.42);
    }
}
