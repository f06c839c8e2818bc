//! Generation client abstraction and request/response types.
//!
//! This module defines the core abstractions for calling the external
//! text-generation service. Calls are whole-reply only; the pipeline
//! never consumes partial output.

use advisor_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::types::GenerationParams;

/// Generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The prompt text to send to the generation service
    pub prompt: String,

    /// Model identifier (e.g., "gemini-2.0-flash", "llama3.2")
    pub model: String,

    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Top-p nucleus sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Top-k sampling cutoff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    /// Create a new generation request with required fields.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            temperature: None,
            top_p: None,
            top_k: None,
            max_tokens: None,
        }
    }

    /// Apply a whole parameter profile at once.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.temperature = Some(params.temperature);
        self.top_p = Some(params.top_p);
        self.top_k = Some(params.top_k);
        self.max_tokens = Some(params.max_tokens);
        self
    }

    /// Set the temperature for sampling.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Generation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated text
    pub content: String,

    /// Model that generated the response
    pub model: String,
}

/// Trait for generation providers.
///
/// This trait abstracts the underlying service (Gemini, Ollama, or a test
/// double) behind a single whole-reply call.
#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    /// Get the provider name (e.g., "gemini", "ollama").
    fn provider_name(&self) -> &str;

    /// Perform one generation call.
    ///
    /// # Arguments
    /// * `request` - The generation request
    ///
    /// # Returns
    /// The complete generated reply
    async fn generate(&self, request: &GenerationRequest) -> AppResult<GenerationResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_params_sets_all_fields() {
        let request = GenerationRequest::new("câu hỏi", "gemini-2.0-flash")
            .with_params(GenerationParams::EXTRACTION);

        assert_eq!(request.temperature, Some(0.1));
        assert_eq!(request.top_p, Some(0.8));
        assert_eq!(request.top_k, Some(40));
        assert_eq!(request.max_tokens, Some(2048));
    }

    #[test]
    fn test_builder_overrides_profile() {
        let request = GenerationRequest::new("câu hỏi", "gemini-2.0-flash")
            .with_params(GenerationParams::GENERAL)
            .with_temperature(0.7)
            .with_max_tokens(256);

        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(256));
        // Untouched fields keep the profile values
        assert_eq!(request.top_p, Some(0.95));
        assert_eq!(request.top_k, Some(40));
    }
}
