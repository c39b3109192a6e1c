//! # nexus-rag
//!
//! Retrieval-augmented answering for the TelcoNexus operator assistant.
//!
//! ## Overview
//!
//! - [`KeywordRetriever`] - ranks [`Corpus`] chunks by keyword overlap and
//!   falls back to a designated chunk when nothing matches
//! - [`Assistant`] - renders retrieved chunks into a prompt under a fixed
//!   operating policy and calls a [`TextGenerator`]
//! - [`GeminiGenerator`] - `generateContent` client (feature `gemini`)
//! - [`Catalog`] - static use-case catalog, overview metrics and architecture
//! - [`Transcript`] - conversation history kept by callers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nexus_rag::{Assistant, GeminiGenerator};
//!
//! let assistant = Assistant::builder()
//!     .generator(Arc::new(GeminiGenerator::from_env()?))
//!     .build()?;
//! let answer = assistant.answer("hss 5003 error", &[]).await;
//! ```

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod conversation;
pub mod corpus;
pub mod document;
pub mod error;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod generation;
pub mod prompt;
pub mod retriever;

pub use assistant::{Assistant, AssistantBuilder, EMPTY_RESPONSE_TEXT, GENERATION_FAILURE_TEXT};
pub use catalog::{
    ActivitySample, Architecture, Catalog, CoverageEntry, Domain, MetricValue, PipelineStage,
    Status, SystemMetric, Trend, UseCase, UseCaseFilter,
};
pub use config::{AssistantConfig, AssistantConfigBuilder, RetrievalConfig, RetrievalConfigBuilder};
pub use conversation::{Message, MessageRole, Transcript};
pub use corpus::{Corpus, TELCO_FALLBACK_ID};
pub use document::{Answer, DocumentChunk};
pub use error::{GenerationError, RagError, Result};
#[cfg(feature = "gemini")]
pub use gemini::GeminiGenerator;
pub use generation::{GenerationReply, GenerationRequest, TextGenerator};
pub use prompt::{POLICY_INSTRUCTION, render_context, render_prompt};
pub use retriever::{KeywordRetriever, Retriever, tokenize};
