//! Embedding configuration.

use advisor_core::config::PipelineConfig;
use serde::{Deserialize, Serialize};

/// Embedding configuration for the document index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Provider name: "hashed", "ollama"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "hashed".to_string(),
            model: "hashed-v1".to_string(),
            dimensions: 384,
        }
    }
}

impl EmbeddingConfig {
    /// Build an embedding config from the pipeline tunables.
    pub fn from_pipeline(pipeline: &PipelineConfig) -> Self {
        let model = match pipeline.embedding_provider.as_str() {
            "ollama" => "nomic-embed-text".to_string(),
            _ => "hashed-v1".to_string(),
        };

        Self {
            provider: pipeline.embedding_provider.clone(),
            model,
            dimensions: pipeline.embedding_dimensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.provider, "hashed");
        assert_eq!(config.model, "hashed-v1");
        assert_eq!(config.dimensions, 384);
    }

    #[test]
    fn test_from_pipeline_maps_ollama_model() {
        let mut pipeline = PipelineConfig::default();
        pipeline.embedding_provider = "ollama".to_string();
        pipeline.embedding_dimensions = 768;

        let config = EmbeddingConfig::from_pipeline(&pipeline);
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model, "nomic-embed-text");
        assert_eq!(config.dimensions, 768);
    }
}
