//! Data types for knowledge-base chunks and generated answers.

use serde::{Deserialize, Serialize};

/// A retrievable unit of text with provenance.
///
/// The `score` field is transient: the corpus stores chunks with a score of
/// `0.0` and the retriever returns copies annotated with the relevance score
/// computed for one specific query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentChunk {
    /// Identifier, unique within its corpus.
    pub id: String,
    /// Human-readable provenance label (e.g. `"Runbook: HSS Troubleshooting v2.1"`).
    pub source: String,
    /// The free-text content of the chunk.
    pub content: String,
    /// Relevance score in `[0, 1]` for the query that produced this copy.
    #[serde(default)]
    pub score: f32,
}

impl DocumentChunk {
    /// Create an unscored chunk.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self { id: id.into(), source: source.into(), content: content.into(), score: 0.0 }
    }

    /// Return a copy of this chunk annotated with `score`.
    pub fn with_score(&self, score: f32) -> Self {
        Self { score, ..self.clone() }
    }
}

/// The outcome of one assistant turn: generated text plus the chunks that
/// were injected as context.
///
/// `used_chunks` is empty when generation failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    /// Text shown to the operator.
    pub text: String,
    /// Chunks injected into the prompt, in retrieval order.
    pub used_chunks: Vec<DocumentChunk>,
}
