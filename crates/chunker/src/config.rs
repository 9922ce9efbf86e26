//! Chunking configuration: size, overlap, unit, and strategy selection.
//!
//! `ChunkConfig` is constructed once per chunking call and validated
//! eagerly; invalid combinations are rejected before any strategy work.

use std::time::Duration;

use textchunk_core::{AppError, AppResult};

/// Unit in which chunk sizes and overlaps are measured.
///
/// Declared once per configuration and fixed for the whole call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    /// Unicode scalar values
    Characters,
    /// Unicode word segments
    Tokens,
}

impl SizeUnit {
    /// Parse a unit name as used in config files and CLI flags.
    pub fn parse(name: &str) -> AppResult<Self> {
        match name {
            "characters" | "chars" => Ok(Self::Characters),
            "tokens" | "words" => Ok(Self::Tokens),
            other => Err(AppError::InvalidConfig(format!(
                "Unknown size unit: '{}'. Supported units: characters, tokens",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::Tokens => "tokens",
        }
    }
}

/// Paragraph-level separator ladder for the recursive strategy.
///
/// Separators are tried in order; segments still oversized after the last
/// separator descend to sentence and then word boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separators(pub Vec<String>);

impl Separators {
    /// Plain prose: split on blank lines.
    pub fn plain() -> Self {
        Self(vec!["\n\n".to_string()])
    }

    /// Markdown: prefer heading boundaries before blank lines.
    pub fn markdown() -> Self {
        Self(vec![
            "\n# ".to_string(),
            "\n## ".to_string(),
            "\n### ".to_string(),
            "\n\n".to_string(),
        ])
    }

    /// Python source: prefer top-level definition boundaries.
    pub fn python() -> Self {
        Self(vec![
            "\nclass ".to_string(),
            "\ndef ".to_string(),
            "\n\tdef ".to_string(),
            "\n\n".to_string(),
        ])
    }

    /// JavaScript/TypeScript source.
    pub fn javascript() -> Self {
        Self(vec![
            "\nfunction ".to_string(),
            "\nclass ".to_string(),
            "\nconst ".to_string(),
            "\n\n".to_string(),
        ])
    }

    /// Resolve a preset by name.
    pub fn preset(name: &str) -> AppResult<Self> {
        match name {
            "plain" => Ok(Self::plain()),
            "markdown" => Ok(Self::markdown()),
            "python" => Ok(Self::python()),
            "javascript" => Ok(Self::javascript()),
            other => Err(AppError::InvalidConfig(format!(
                "Unknown separator preset: '{}'. Supported presets: plain, markdown, python, javascript",
                other
            ))),
        }
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self::plain()
    }
}

/// Parameters for the semantic strategy.
#[derive(Debug, Clone)]
pub struct SemanticParams {
    /// Similarity provider identifier (resolved by the provider factory)
    pub provider: String,

    /// Breakpoint threshold in [0,1]: a boundary is inserted where the
    /// similarity between adjacent sentences drops below this value
    pub threshold: f64,

    /// Segments shorter than this (in the configured unit) are merged
    /// forward into the following segment; 0 disables merging
    pub min_chunk_units: usize,
}

impl SemanticParams {
    pub fn new(provider: impl Into<String>, threshold: f64) -> Self {
        Self {
            provider: provider.into(),
            threshold,
            min_chunk_units: 0,
        }
    }

    pub fn with_min_chunk_units(mut self, min_chunk_units: usize) -> Self {
        self.min_chunk_units = min_chunk_units;
        self
    }
}

/// Chunking strategy: a closed set of recognized modes.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Fixed-size windows stepping by `chunk_size - overlap`
    Fixed,

    /// Prioritized separator descent: paragraph, sentence, word
    Recursive { separators: Separators },

    /// Boundaries where adjacent-sentence similarity drops below a threshold
    Semantic(SemanticParams),
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Recursive { .. } => "recursive",
            Self::Semantic(_) => "semantic",
        }
    }
}

/// Validated chunking configuration, immutable for the duration of a call.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Target chunk size in the configured unit; must be positive
    pub chunk_size: usize,

    /// Overlap between consecutive chunks; must be less than `chunk_size`
    pub overlap: usize,

    /// Measurement unit for sizes and overlaps
    pub unit: SizeUnit,

    /// Selected strategy with its parameters
    pub strategy: Strategy,

    /// Timeout applied to each external similarity call (semantic strategy);
    /// elapsing degrades to `SimilarityUnavailable`, never a partial result
    pub similarity_timeout: Duration,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 100,
            unit: SizeUnit::Characters,
            strategy: Strategy::Recursive {
                separators: Separators::default(),
            },
            similarity_timeout: Duration::from_secs(30),
        }
    }
}

impl ChunkConfig {
    /// Validate the configuration, rejecting invalid combinations eagerly.
    pub fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(AppError::InvalidConfig(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.overlap >= self.chunk_size {
            return Err(AppError::InvalidConfig(format!(
                "overlap ({}) must be less than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }

        if let Strategy::Semantic(params) = &self.strategy {
            if params.provider.trim().is_empty() {
                return Err(AppError::InvalidConfig(
                    "semantic strategy requires a similarity provider".to_string(),
                ));
            }
            if !params.threshold.is_finite() || !(0.0..=1.0).contains(&params.threshold) {
                return Err(AppError::InvalidConfig(format!(
                    "similarity threshold ({}) must be within [0,1]",
                    params.threshold
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textchunk_core::AppError;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ChunkConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = ChunkConfig {
            chunk_size: 0,
            overlap: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_overlap_equal_to_chunk_size_rejected() {
        let config = ChunkConfig {
            chunk_size: 500,
            overlap: 500,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(_)));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_semantic_threshold_out_of_range_rejected() {
        let config = ChunkConfig {
            strategy: Strategy::Semantic(SemanticParams::new("constant", 1.5)),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_semantic_without_provider_rejected() {
        let config = ChunkConfig {
            strategy: Strategy::Semantic(SemanticParams::new("", 0.5)),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!(SizeUnit::parse("characters").unwrap(), SizeUnit::Characters);
        assert_eq!(SizeUnit::parse("tokens").unwrap(), SizeUnit::Tokens);
        assert!(SizeUnit::parse("bytes").is_err());
    }

    #[test]
    fn test_separator_presets() {
        assert_eq!(Separators::preset("plain").unwrap(), Separators::plain());
        assert!(Separators::preset("cobol").is_err());
    }
}
