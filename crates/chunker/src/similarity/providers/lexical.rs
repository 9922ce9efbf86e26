//! Deterministic local similarity from hashed character trigrams.

use textchunk_core::AppResult;

use super::super::SimilarityProvider;

const DIM: usize = 256;

/// Cosine similarity over hashed character-trigram frequency vectors.
///
/// Purely lexical: no model, no network, stable across runs. Scores land in
/// [0,1] because trigram counts are non-negative.
#[derive(Debug, Clone, Default)]
pub struct LexicalProvider;

#[async_trait::async_trait]
impl SimilarityProvider for LexicalProvider {
    fn name(&self) -> &str {
        "lexical"
    }

    async fn similarity(&self, a: &str, b: &str) -> AppResult<f64> {
        Ok(cosine(&embed(a), &embed(b)))
    }
}

/// Fold word trigrams into a fixed-dimension frequency vector.
fn embed(text: &str) -> [f64; DIM] {
    let mut vector = [0.0f64; DIM];

    for word in text.to_lowercase().split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() < 3 {
            let hash = hash_chars(&chars);
            vector[(hash as usize) % DIM] += 1.0;
            continue;
        }
        for window in chars.windows(3) {
            let hash = hash_chars(window);
            vector[(hash as usize) % DIM] += 1.0;
        }
    }

    vector
}

fn hash_chars(chars: &[char]) -> u64 {
    chars
        .iter()
        .fold(0u64, |acc, &c| acc.wrapping_mul(37).wrapping_add(c as u64))
}

fn cosine(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_identical_texts_score_one() {
        let provider = LexicalProvider;
        let score = provider
            .similarity("the cat sat on the mat", "the cat sat on the mat")
            .await
            .unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_related_texts_score_higher_than_unrelated() {
        let provider = LexicalProvider;
        let related = provider
            .similarity("chunking splits documents", "chunking splits document text")
            .await
            .unwrap();
        let unrelated = provider
            .similarity("chunking splits documents", "quartz zebras vexing jumps")
            .await
            .unwrap();
        assert!(related > unrelated);
    }

    #[tokio::test]
    async fn test_empty_text_scores_zero() {
        let provider = LexicalProvider;
        let score = provider.similarity("", "anything").await.unwrap();
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_scores_within_range() {
        let provider = LexicalProvider;
        for (a, b) in [
            ("alpha beta", "gamma delta"),
            ("one", "one two"),
            ("x", "y"),
        ] {
            let score = provider.similarity(a, b).await.unwrap();
            assert!((0.0..=1.0).contains(&score));
        }
    }
}
