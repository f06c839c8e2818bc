//! Ollama generation provider.
//!
//! Talks to a local Ollama daemon through its `/api/generate` endpoint.
//! Sampling parameters ride in the nested `options` object that Ollama
//! expects; requests are always non-streaming.

use advisor_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::client::{GenerationClient, GenerationRequest, GenerationResponse};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Ollama API request format.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<SamplingOptions>,
}

/// Sampling knobs, nested under `options` in the request body.
#[derive(Debug, Serialize)]
struct SamplingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

impl SamplingOptions {
    fn from_request(request: &GenerationRequest) -> Option<Self> {
        if request.temperature.is_none()
            && request.top_p.is_none()
            && request.top_k.is_none()
            && request.max_tokens.is_none()
        {
            return None;
        }
        Some(Self {
            temperature: request.temperature,
            top_p: request.top_p,
            top_k: request.top_k,
            num_predict: request.max_tokens,
        })
    }
}

/// Ollama API response format.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    model: String,
    response: String,
}

/// Ollama generation client.
pub struct OllamaClient {
    /// Base URL of the local daemon
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OllamaClient {
    /// Create a client against the default local daemon.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Convert GenerationRequest to the Ollama wire format.
    fn to_generate_request(&self, request: &GenerationRequest) -> GenerateRequest {
        GenerateRequest {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            stream: false,
            options: SamplingOptions::from_request(request),
        }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GenerationClient for OllamaClient {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, request: &GenerationRequest) -> AppResult<GenerationResponse> {
        tracing::info!(model = %request.model, "Sending generation request to Ollama");
        tracing::debug!(
            temperature = ?request.temperature,
            max_tokens = ?request.max_tokens,
            prompt_chars = request.prompt.chars().count(),
            "Ollama request parameters"
        );

        let body = self.to_generate_request(request);
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("Ollama request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "Ollama returned {}: {}",
                status, detail
            )));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("Unreadable Ollama response: {}", e)))?;

        tracing::info!("Received generation from Ollama");

        Ok(GenerationResponse {
            content: reply.response,
            model: reply.model,
        })
    }
}
