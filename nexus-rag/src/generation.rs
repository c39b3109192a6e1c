//! Text generation trait for the external model collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::prompt::{POLICY_INSTRUCTION, render_prompt};

/// A single context-injected generation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    /// Model identifier, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Rendered `Source:`/`Content:` block of retrieved chunks.
    pub context_block: String,
    /// System instruction constraining the model's behaviour.
    pub policy_instruction: String,
    /// The operator's question, verbatim.
    pub question: String,
    /// Full user-turn text: context block plus question.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl GenerationRequest {
    /// Build a request with the standard policy instruction.
    pub fn new(
        model: impl Into<String>,
        context_block: impl Into<String>,
        question: impl Into<String>,
        temperature: f32,
    ) -> Self {
        let context_block = context_block.into();
        let question = question.into();
        let prompt = render_prompt(&context_block, &question);
        Self {
            model: model.into(),
            context_block,
            policy_instruction: POLICY_INSTRUCTION.to_string(),
            question,
            prompt,
            temperature,
        }
    }
}

/// The model's reply. `text` is empty when the provider returned no text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerationReply {
    pub text: String,
}

/// A provider that turns a [`GenerationRequest`] into text.
///
/// Implementations wrap a specific backend (Gemini, test fakes) behind a
/// single async call.
///
/// # Example
///
/// ```rust,ignore
/// use nexus_rag::{GenerationRequest, TextGenerator};
///
/// let request = GenerationRequest::new("gemini-2.5-flash", context, "What is N4?", 0.2);
/// let reply = generator.generate(&request).await?;
/// ```
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &str;

    /// Perform one generation call.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<GenerationReply, GenerationError>;
}
