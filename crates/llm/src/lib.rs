//! Generation-service integration for the admissions advisor.
//!
//! This crate provides a provider-agnostic abstraction for the external
//! text-generation service. It supports multiple providers through a
//! unified trait-based interface, plus the retry policy and per-call
//! parameter profiles the pipeline uses.
//!
//! # Providers
//! - **Gemini**: Google Generative Language API (default)
//! - **Ollama**: Local LLM runtime
//!
//! # Example
//! ```no_run
//! use advisor_llm::{GenerationClient, GenerationParams, GenerationRequest};
//! use advisor_llm::providers::OllamaClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = GenerationRequest::new("Xin chào!", "llama3.2")
//!     .with_params(GenerationParams::GENERAL);
//! let response = client.generate(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod retry;
pub mod types;

// Re-export main types
pub use client::{GenerationClient, GenerationRequest, GenerationResponse};
pub use factory::create_client;
pub use providers::{GeminiClient, OllamaClient};
pub use retry::{with_retries, RetryPolicy};
pub use types::{GenerationParams, ProviderType};
