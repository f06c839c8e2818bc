//! Embedding providers for the document index.
//!
//! Provider-agnostic embedding generation. The default hashed encoder is
//! deterministic and fully local; the Ollama provider trades that for real
//! semantic vectors when a local model server is available.

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};
