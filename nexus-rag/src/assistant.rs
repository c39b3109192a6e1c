//! Retrieval-augmented answer orchestration.
//!
//! The [`Assistant`] retrieves context for a question, renders it into a
//! prompt under the fixed operating policy, and calls a [`TextGenerator`].
//! Generation failures never escape [`Assistant::answer`]; they become a
//! fixed, displayable error answer.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nexus_rag::{Assistant, GeminiGenerator};
//!
//! let assistant = Assistant::builder()
//!     .generator(Arc::new(GeminiGenerator::from_env()?))
//!     .build()?;
//!
//! let answer = assistant.answer("How do I clear HSS error 5003?", &[]).await;
//! println!("{}", answer.text);
//! ```

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::config::{AssistantConfig, RetrievalConfig};
use crate::conversation::Message;
use crate::corpus::Corpus;
use crate::document::{Answer, DocumentChunk};
use crate::error::{GenerationError, RagError, Result};
use crate::generation::{GenerationReply, GenerationRequest, TextGenerator};
use crate::prompt::render_context;
use crate::retriever::{KeywordRetriever, Retriever};

/// Returned when the generator succeeds with no text.
pub const EMPTY_RESPONSE_TEXT: &str = "No response generated.";

/// Returned when the generator fails for any reason.
pub const GENERATION_FAILURE_TEXT: &str = "Error: Unable to connect to the inference engine. \
Please check your network connection or API key configuration.";

/// Answers operator questions from the knowledge base.
///
/// Holds only read-only state, so one instance can serve concurrent callers.
/// Construct one via [`Assistant::builder()`].
pub struct Assistant {
    config: AssistantConfig,
    corpus: Arc<Corpus>,
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn TextGenerator>,
}

impl Assistant {
    /// Create a new [`AssistantBuilder`].
    pub fn builder() -> AssistantBuilder {
        AssistantBuilder::default()
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Run retrieval only.
    pub fn retrieve(&self, query: &str) -> Vec<DocumentChunk> {
        self.retriever.retrieve(query, &self.corpus)
    }

    /// Build the generation request for `question` from already retrieved chunks.
    pub fn build_request(&self, question: &str, chunks: &[DocumentChunk]) -> GenerationRequest {
        GenerationRequest::new(
            self.config.model.clone(),
            render_context(chunks),
            question,
            self.config.temperature,
        )
    }

    /// Answer `question`: retrieve → render prompt → generate.
    ///
    /// `history` is accepted for callers that keep a transcript, but only the
    /// current question and its freshly retrieved context are sent
    /// (single-turn context injection).
    ///
    /// On any generation failure, including the configured timeout elapsing,
    /// the failure is logged and the answer carries
    /// [`GENERATION_FAILURE_TEXT`] with no chunks.
    #[instrument(skip_all, fields(question_len = question.len(), history_len = history.len()))]
    pub async fn answer(&self, question: &str, history: &[Message]) -> Answer {
        let used_chunks = self.retrieve(question);
        let request = self.build_request(question, &used_chunks);

        match self.generate(&request).await {
            Ok(reply) => {
                info!(
                    provider = self.generator.name(),
                    chunk_count = used_chunks.len(),
                    reply_len = reply.text.len(),
                    "answer generated"
                );
                let text = if reply.text.is_empty() {
                    EMPTY_RESPONSE_TEXT.to_string()
                } else {
                    reply.text
                };
                Answer { text, used_chunks }
            }
            Err(e) => {
                error!(provider = self.generator.name(), error = %e, "generation failed");
                Answer { text: GENERATION_FAILURE_TEXT.to_string(), used_chunks: Vec::new() }
            }
        }
    }

    /// Call the generator, bounded by the configured timeout.
    ///
    /// Expiry drops the in-flight future, cancelling the request.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<GenerationReply, GenerationError> {
        tokio::time::timeout(self.config.timeout, self.generator.generate(request))
            .await
            .map_err(|_| GenerationError::Timeout(self.config.timeout))?
    }
}

/// Builder for constructing an [`Assistant`].
///
/// Only `generator` is required. The corpus defaults to the TelcoNexus
/// knowledge base and retrieval uses [`KeywordRetriever`] with
/// [`RetrievalConfig::default()`].
#[derive(Default)]
pub struct AssistantBuilder {
    config: Option<AssistantConfig>,
    corpus: Option<Arc<Corpus>>,
    retrieval_config: Option<RetrievalConfig>,
    retriever: Option<Arc<dyn Retriever>>,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl AssistantBuilder {
    /// Set the generation configuration.
    pub fn config(mut self, config: AssistantConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the knowledge base to search.
    pub fn corpus(mut self, corpus: Arc<Corpus>) -> Self {
        self.corpus = Some(corpus);
        self
    }

    /// Use a [`KeywordRetriever`] with the given scoring parameters.
    ///
    /// Ignored when a custom [`retriever`](Self::retriever) is set.
    pub fn retrieval_config(mut self, config: RetrievalConfig) -> Self {
        self.retrieval_config = Some(config);
        self
    }

    /// Set a custom retriever.
    pub fn retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Set the text generator.
    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`Assistant`].
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if no generator was set or the
    /// retrieval configuration is invalid.
    pub fn build(self) -> Result<Assistant> {
        let generator = self
            .generator
            .ok_or_else(|| RagError::ConfigError("generator is required".to_string()))?;

        let retriever: Arc<dyn Retriever> = match self.retriever {
            Some(retriever) => retriever,
            None => Arc::new(KeywordRetriever::new(self.retrieval_config.unwrap_or_default())?),
        };

        Ok(Assistant {
            config: self.config.unwrap_or_default(),
            corpus: self.corpus.unwrap_or_else(|| Arc::new(Corpus::telco_default())),
            retriever,
            generator,
        })
    }
}
