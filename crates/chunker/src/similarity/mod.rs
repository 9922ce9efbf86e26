//! Similarity provider trait and factory.
//!
//! The semantic strategy consumes an externally supplied similarity signal.
//! Providers are injected capabilities referenced by identifier, never
//! owned globals, so tests can substitute deterministic stubs.

pub mod providers;

use std::sync::Arc;

use textchunk_core::{AppError, AppResult};

/// External capability returning a closeness score between two text units.
#[async_trait::async_trait]
pub trait SimilarityProvider: Send + Sync + std::fmt::Debug {
    /// Provider identifier (e.g., "constant", "lexical")
    fn name(&self) -> &str;

    /// Score the similarity of two text units; must return a value in [0,1].
    async fn similarity(&self, a: &str, b: &str) -> AppResult<f64>;
}

/// Resolve a similarity provider from its configuration identifier.
///
/// Recognized identifiers:
/// - `constant` or `constant:<score>` — fixed score, for tests and wiring
///   checks
/// - `lexical` — cosine similarity over hashed character trigrams
pub fn create_provider(spec: &str) -> AppResult<Arc<dyn SimilarityProvider>> {
    if let Some(rest) = spec.strip_prefix("constant") {
        let score = match rest.strip_prefix(':') {
            Some(value) => value.parse::<f64>().map_err(|_| {
                AppError::InvalidConfig(format!("Invalid constant similarity score: '{}'", value))
            })?,
            None if rest.is_empty() => 1.0,
            _ => {
                return Err(AppError::InvalidConfig(format!(
                    "Unknown similarity provider: '{}'. Supported providers: constant[:score], lexical",
                    spec
                )))
            }
        };
        if !(0.0..=1.0).contains(&score) {
            return Err(AppError::InvalidConfig(format!(
                "Constant similarity score ({}) must be within [0,1]",
                score
            )));
        }
        return Ok(Arc::new(providers::ConstantProvider::new(score)));
    }

    match spec {
        "lexical" => Ok(Arc::new(providers::LexicalProvider::default())),
        _ => Err(AppError::InvalidConfig(format!(
            "Unknown similarity provider: '{}'. Supported providers: constant[:score], lexical",
            spec
        ))),
    }
}
