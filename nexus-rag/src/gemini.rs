//! Gemini text generation over the `generateContent` REST endpoint.
//!
//! This module is only available when the `gemini` feature is enabled.

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::error::GenerationError;
use crate::generation::{GenerationReply, GenerationRequest, TextGenerator};

/// The default Generative Language API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

const PROVIDER: &str = "Gemini";

/// A [`TextGenerator`] backed by the Gemini API.
///
/// Uses `reqwest` to call `models/{model}:generateContent` directly. The
/// prompt is sent as a single `user` turn; the policy instruction travels as
/// `systemInstruction`.
///
/// # Configuration
///
/// - `api_key` – from the constructor or `GOOGLE_API_KEY` / `GEMINI_API_KEY`.
/// - `base_url` – defaults to the public v1beta endpoint; override with
///   [`GeminiGenerator::with_base_url`] for proxies or tests.
///
/// # Example
///
/// ```rust,ignore
/// use nexus_rag::gemini::GeminiGenerator;
///
/// let generator = GeminiGenerator::from_env()?;
/// let reply = generator.generate(&request).await?;
/// ```
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl GeminiGenerator {
    /// Create a new generator with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GenerationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey("API key must not be empty".into()));
        }
        let base_url = Url::parse(DEFAULT_BASE_URL).map_err(|e| GenerationError::Transport {
            provider: PROVIDER.into(),
            message: e.to_string(),
        })?;

        Ok(Self { client: reqwest::Client::new(), api_key, base_url })
    }

    /// Create a new generator using `GOOGLE_API_KEY`, falling back to `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .map_err(|_| {
                GenerationError::MissingApiKey(
                    "GOOGLE_API_KEY or GEMINI_API_KEY environment variable not set".into(),
                )
            })?;
        Self::new(api_key)
    }

    /// Point the generator at a different API root.
    ///
    /// A trailing slash is added if missing so that relative joins keep the
    /// last path segment.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, GenerationError> {
        let normalized =
            if base_url.ends_with('/') { base_url.to_string() } else { format!("{base_url}/") };
        self.base_url = Url::parse(&normalized).map_err(|e| GenerationError::Transport {
            provider: PROVIDER.into(),
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;
        Ok(self)
    }

    fn endpoint(&self, model: &str) -> Result<Url, GenerationError> {
        let model = model.strip_prefix("models/").unwrap_or(model);
        self.base_url.join(&format!("models/{model}:generateContent")).map_err(|e| {
            GenerationError::Transport {
                provider: PROVIDER.into(),
                message: format!("failed to construct URL for model '{model}': {e}"),
            }
        })
    }
}

// ── Gemini API request/response types ──────────────────────────────

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, or an empty string.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.iter().filter_map(|p| p.text.as_deref()).collect())
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl From<&GenerationRequest> for GenerateContentRequest {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part { text: Some(request.prompt.clone()) }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: Some(request.policy_instruction.clone()) }],
            },
            generation_config: GenerationConfig { temperature: request.temperature },
        }
    }
}

// ── TextGenerator implementation ───────────────────────────────────

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        PROVIDER
    }

    #[instrument(skip_all, fields(model = %request.model, prompt_len = request.prompt.len()))]
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationReply, GenerationError> {
        let url = self.endpoint(&request.model)?;
        let body = GenerateContentRequest::from(request);

        debug!(provider = PROVIDER, temperature = request.temperature, "sending generateContent");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = PROVIDER, error = %e, "request failed");
                GenerationError::Transport {
                    provider: PROVIDER.into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = PROVIDER, %status, "API error");
            return Err(GenerationError::Status { code: status.as_u16(), message: detail });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(provider = PROVIDER, error = %e, "failed to parse response");
            GenerationError::Decode(e.to_string())
        })?;

        Ok(GenerationReply { text: parsed.text() })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_serializes_in_camel_case() {
        let request = GenerationRequest::new("gemini-2.5-flash", "Source: a\nContent: b", "q", 0.2);
        let value = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], request.prompt.as_str());
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            request.policy_instruction.as_str()
        );
        assert!(value["systemInstruction"].get("role").is_none());
        assert!((value["generationConfig"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Verify "}, {"text": "SCTP."}]}},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(resp.text(), "Verify SCTP.");
    }

    #[test]
    fn response_without_candidates_is_empty_text() {
        let resp: GenerateContentResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert_eq!(resp.text(), "");

        let resp: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(resp.text(), "");
    }

    #[test]
    fn endpoint_strips_models_prefix() {
        let generator = GeminiGenerator::new("key").unwrap();
        let url = generator.endpoint("models/gemini-2.5-pro").unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(matches!(GeminiGenerator::new("  "), Err(GenerationError::MissingApiKey(_))));
    }
}
