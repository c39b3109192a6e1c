//! Read-only knowledge base searched by the retriever.
//!
//! A [`Corpus`] is an ordered, immutable list of [`DocumentChunk`]s plus the
//! id of the chunk returned when nothing clears the relevance floor. It is
//! constructed explicitly and passed to the retriever, so tests can swap in
//! synthetic corpora.

use std::collections::HashSet;

use serde::Deserialize;

use crate::document::DocumentChunk;
use crate::error::{RagError, Result};

/// Id of the fallback chunk in the default TelcoNexus knowledge base.
pub const TELCO_FALLBACK_ID: &str = "doc-3";

/// An ordered, read-only set of chunks with a designated fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    chunks: Vec<DocumentChunk>,
    fallback: Option<usize>,
}

#[derive(Deserialize)]
struct CorpusFile {
    fallback_id: String,
    chunks: Vec<DocumentChunk>,
}

impl Corpus {
    /// Create a corpus from `chunks`, designating `fallback_id` as the chunk
    /// returned when a query matches nothing.
    ///
    /// Stored scores are reset to `0.0`; scores only exist per query.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::CorpusError`] if two chunks share an id, or if the
    /// chunk list is non-empty and does not contain `fallback_id`.
    pub fn new(chunks: Vec<DocumentChunk>, fallback_id: &str) -> Result<Self> {
        let mut seen = HashSet::with_capacity(chunks.len());
        for chunk in &chunks {
            if !seen.insert(chunk.id.as_str()) {
                return Err(RagError::CorpusError(format!("duplicate chunk id '{}'", chunk.id)));
            }
        }

        let fallback = chunks.iter().position(|c| c.id == fallback_id);
        if fallback.is_none() && !chunks.is_empty() {
            return Err(RagError::CorpusError(format!(
                "fallback chunk '{fallback_id}' is not part of the corpus"
            )));
        }

        let chunks = chunks.into_iter().map(|c| DocumentChunk { score: 0.0, ..c }).collect();
        Ok(Self { chunks, fallback })
    }

    /// An empty corpus. Retrieval against it always yields no chunks.
    pub fn empty() -> Self {
        Self { chunks: Vec::new(), fallback: None }
    }

    /// Load a corpus from JSON of the form
    /// `{"fallback_id": "...", "chunks": [{"id", "source", "content"}, ...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CorpusFile = serde_json::from_str(json)
            .map_err(|e| RagError::CorpusError(format!("invalid corpus JSON: {e}")))?;
        Self::new(file.chunks, &file.fallback_id)
    }

    /// The TelcoNexus internal knowledge base.
    pub fn telco_default() -> Self {
        let chunks = vec![
            DocumentChunk::new(
                "doc-1",
                "Runbook: HSS Troubleshooting v2.1",
                "If HSS returns error 5003 (Database Lock), first verify the SCTP association \
                 status. If down, attempt a soft restart of the diameter stack using command \
                 `service diameter-stack restart`. Do not hard reset the node unless traffic \
                 is below 10%.",
            ),
            DocumentChunk::new(
                "doc-2",
                "Policy: Incident Management Level 1",
                "All critical network incidents affecting >1000 users must be reported to the \
                 NOC Supervisor within 15 minutes. Use ticket template INC-CRITICAL.",
            ),
            DocumentChunk::new(
                TELCO_FALLBACK_ID,
                "Architecture: 5G Core Layout",
                "The 5G Core is deployed on Kubernetes clusters across 3 Availability Zones. \
                 The UPF (User Plane Function) handles data forwarding. N4 interface connects \
                 SMF and UPF.",
            ),
            DocumentChunk::new(
                "doc-4",
                "Script: Optical Diagnostic",
                "The Python script `opt_diag.py` connects to the OLT via SSH. It expects \
                 environment variables OLT_HOST and OLT_USER. It retrieves attenuation levels \
                 for all ONUs.",
            ),
            DocumentChunk::new(
                "doc-5",
                "Compliance: GDPR Data Handling",
                "Customer Identifiable Information (CII) must not be stored in raw text logs. \
                 All CDRs exported to the Data Lake must be hashed using SHA-256 with a daily \
                 rotating salt.",
            ),
        ];
        Self { chunks, fallback: Some(2) }
    }

    /// The chunks in corpus order.
    pub fn chunks(&self) -> &[DocumentChunk] {
        &self.chunks
    }

    /// The designated fallback chunk, if the corpus is non-empty.
    pub fn fallback(&self) -> Option<&DocumentChunk> {
        self.fallback.map(|i| &self.chunks[i])
    }

    /// Look up a chunk by id.
    pub fn get(&self, id: &str) -> Option<&DocumentChunk> {
        self.chunks.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::telco_default()
    }
}
