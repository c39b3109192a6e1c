//! Configuration for retrieval and answer generation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Scoring parameters for the keyword retriever.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Score added for every query term found in a chunk's content or source.
    pub term_weight: f32,
    /// Upper bound applied to a chunk's accumulated score.
    pub max_score: f32,
    /// Chunks must score strictly above this value to be returned.
    pub relevance_floor: f32,
    /// Maximum number of chunks returned per query.
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { term_weight: 0.2, max_score: 0.99, relevance_floor: 0.1, top_k: 3 }
    }
}

impl RetrievalConfig {
    /// Create a new builder for constructing a [`RetrievalConfig`].
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }

    /// Check that the parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `top_k == 0`
    /// - `term_weight <= 0`
    /// - `max_score` is outside `(0, 1]`
    /// - `relevance_floor >= max_score`
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        if self.term_weight <= 0.0 {
            return Err(RagError::ConfigError(format!(
                "term_weight ({}) must be positive",
                self.term_weight
            )));
        }
        if self.max_score <= 0.0 || self.max_score > 1.0 {
            return Err(RagError::ConfigError(format!(
                "max_score ({}) must be in (0, 1]",
                self.max_score
            )));
        }
        if self.relevance_floor >= self.max_score {
            return Err(RagError::ConfigError(format!(
                "relevance_floor ({}) must be less than max_score ({})",
                self.relevance_floor, self.max_score
            )));
        }
        Ok(())
    }
}

/// Builder for constructing a validated [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    config: RetrievalConfig,
}

impl RetrievalConfigBuilder {
    /// Set the per-term score increment.
    pub fn term_weight(mut self, weight: f32) -> Self {
        self.config.term_weight = weight;
        self
    }

    /// Set the score cap.
    pub fn max_score(mut self, max: f32) -> Self {
        self.config.max_score = max;
        self
    }

    /// Set the relevance floor.
    pub fn relevance_floor(mut self, floor: f32) -> Self {
        self.config.relevance_floor = floor;
        self
    }

    /// Set the maximum number of chunks returned.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Build the [`RetrievalConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// See [`RetrievalConfig::validate`].
    pub fn build(self) -> Result<RetrievalConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Generation parameters used by the [`Assistant`](crate::assistant::Assistant).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantConfig {
    /// Model identifier passed to the generation provider.
    pub model: String,
    /// Sampling temperature; kept low for factual answers.
    pub temperature: f32,
    /// Upper bound on a single generation call.
    pub timeout: Duration,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.2,
            timeout: Duration::from_secs(30),
        }
    }
}

impl AssistantConfig {
    /// Create a new builder for constructing an [`AssistantConfig`].
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`AssistantConfig`].
#[derive(Debug, Clone, Default)]
pub struct AssistantConfigBuilder {
    config: AssistantConfig,
}

impl AssistantConfigBuilder {
    /// Set the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the bound on a single generation call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the [`AssistantConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `model` is empty
    /// - `temperature` is outside `[0, 2]`
    /// - `timeout` is zero
    pub fn build(self) -> Result<AssistantConfig> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(RagError::ConfigError("model must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&c.temperature) {
            return Err(RagError::ConfigError(format!(
                "temperature ({}) must be in [0, 2]",
                c.temperature
            )));
        }
        if c.timeout.is_zero() {
            return Err(RagError::ConfigError("timeout must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieval_defaults_are_valid() {
        let config = RetrievalConfig::builder().build().unwrap();
        assert_eq!(config, RetrievalConfig::default());
        assert_eq!(config.top_k, 3);
    }

    #[test]
    fn retrieval_rejects_zero_top_k() {
        let err = RetrievalConfig::builder().top_k(0).build().unwrap_err();
        assert!(matches!(err, RagError::ConfigError(_)));
    }

    #[test]
    fn retrieval_rejects_floor_above_cap() {
        let err =
            RetrievalConfig::builder().relevance_floor(0.99).max_score(0.5).build().unwrap_err();
        assert!(err.to_string().contains("relevance_floor"));
    }

    #[test]
    fn assistant_rejects_bad_temperature_and_timeout() {
        assert!(AssistantConfig::builder().temperature(3.0).build().is_err());
        assert!(AssistantConfig::builder().timeout(Duration::ZERO).build().is_err());
        assert!(AssistantConfig::builder().model("  ").build().is_err());
    }

    #[test]
    fn assistant_config_loads_from_json() {
        let config: AssistantConfig = serde_json::from_str(
            r#"{"model":"gemini-2.5-pro","temperature":0.0,"timeout":{"secs":5,"nanos":0}}"#,
        )
        .unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
