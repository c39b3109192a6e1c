//! Keyword-overlap retrieval over a [`Corpus`].
//!
//! Scoring is a simple stand-in for vector similarity: each query term found
//! as a substring of a chunk's content or source adds a fixed weight. Terms
//! are not deduplicated, so a repeated keyword counts once per occurrence.

use tracing::debug;

use crate::config::RetrievalConfig;
use crate::corpus::Corpus;
use crate::document::DocumentChunk;
use crate::error::Result;

/// Selects the chunks of a corpus relevant to a query.
///
/// Implementations are pure: the same query against the same corpus yields
/// the same ordered result.
pub trait Retriever: Send + Sync {
    /// Return at most `top_k` scored chunks, best first.
    fn retrieve(&self, query: &str, corpus: &Corpus) -> Vec<DocumentChunk>;
}

/// A [`Retriever`] that ranks chunks by keyword overlap.
///
/// # Example
///
/// ```rust,ignore
/// use nexus_rag::{Corpus, KeywordRetriever, Retriever};
///
/// let retriever = KeywordRetriever::default();
/// let chunks = retriever.retrieve("hss 5003 error", &Corpus::telco_default());
/// assert_eq!(chunks[0].id, "doc-1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeywordRetriever {
    config: RetrievalConfig,
}

impl KeywordRetriever {
    /// Create a retriever with the given scoring parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`](crate::error::RagError::ConfigError)
    /// if `config` fails [`RetrievalConfig::validate`].
    pub fn new(config: RetrievalConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Score one chunk against pre-split, lowercase `terms`, without clamping.
    pub fn raw_score(&self, terms: &[String], chunk: &DocumentChunk) -> f32 {
        let content = chunk.content.to_lowercase();
        let source = chunk.source.to_lowercase();
        terms
            .iter()
            .filter(|term| content.contains(term.as_str()) || source.contains(term.as_str()))
            .map(|_| self.config.term_weight)
            .sum()
    }

    /// Score one chunk for `query`, clamped to `max_score`.
    pub fn score(&self, query: &str, chunk: &DocumentChunk) -> f32 {
        self.raw_score(&tokenize(query), chunk).min(self.config.max_score)
    }
}

/// Lowercase `query` and split it on whitespace. Duplicates are kept.
pub fn tokenize(query: &str) -> Vec<String> {
    query.to_lowercase().split_whitespace().map(str::to_string).collect()
}

impl Retriever for KeywordRetriever {
    fn retrieve(&self, query: &str, corpus: &Corpus) -> Vec<DocumentChunk> {
        let terms = tokenize(query);

        let mut scored: Vec<DocumentChunk> = corpus
            .chunks()
            .iter()
            .map(|chunk| {
                let score = self.raw_score(&terms, chunk).min(self.config.max_score);
                chunk.with_score(score)
            })
            .filter(|chunk| chunk.score > self.config.relevance_floor)
            .collect();

        // `sort_by` is stable, so equal scores keep corpus order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(self.config.top_k);

        if scored.is_empty() {
            if let Some(fallback) = corpus.fallback() {
                debug!(
                    term_count = terms.len(),
                    fallback.id = %fallback.id,
                    "no chunk matched, using fallback"
                );
                return vec![fallback.with_score(0.0)];
            }
        }

        debug!(term_count = terms.len(), result_count = scored.len(), "retrieval completed");
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn tokenize_discards_empty_terms_and_keeps_duplicates() {
        assert_eq!(tokenize("  HSS   hss\t5003\n"), vec!["hss", "hss", "5003"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn source_label_counts_as_a_match() {
        let retriever = KeywordRetriever::default();
        let chunk = DocumentChunk::new("x", "Runbook: Fiber", "nothing relevant here");
        assert!(approx(retriever.score("runbook", &chunk), 0.2));
    }

    #[test]
    fn score_is_clamped() {
        let retriever = KeywordRetriever::default();
        let chunk = DocumentChunk::new("x", "s", "a b c d e f g");
        let raw = retriever.raw_score(&tokenize("a b c d e f g"), &chunk);
        assert!(approx(raw, 1.4));
        assert!(approx(retriever.score("a b c d e f g", &chunk), 0.99));
    }

    #[test]
    fn new_rejects_unvalidated_config() {
        let config = RetrievalConfig { top_k: 0, ..RetrievalConfig::default() };
        assert!(KeywordRetriever::new(config).is_err());

        let config = RetrievalConfig { relevance_floor: 0.99, ..RetrievalConfig::default() };
        assert!(KeywordRetriever::new(config).is_err());

        assert!(KeywordRetriever::new(RetrievalConfig::default()).is_ok());
    }

    #[test]
    fn repeated_term_counts_per_occurrence() {
        let retriever = KeywordRetriever::default();
        let chunk = DocumentChunk::new("x", "s", "upf");
        assert!(approx(retriever.score("upf upf", &chunk), 0.4));
    }
}
