//! Generation parameter profiles and provider identification.

use serde::{Deserialize, Serialize};

/// Sampling parameters for one generation call.
///
/// Each pipeline stage uses a fixed profile: factual extraction runs cold,
/// synthesis slightly warmer, the general-knowledge fallback warmer still.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_tokens: u32,
}

impl GenerationParams {
    /// Per-source extraction of facts from retrieved passages.
    pub const EXTRACTION: GenerationParams = GenerationParams {
        temperature: 0.1,
        top_p: 0.8,
        top_k: 40,
        max_tokens: 2048,
    };

    /// Merging ranked partial answers into one reply.
    pub const SYNTHESIS: GenerationParams = GenerationParams {
        temperature: 0.2,
        top_p: 0.95,
        top_k: 40,
        max_tokens: 2048,
    };

    /// General-knowledge fallback when the corpus has nothing.
    pub const GENERAL: GenerationParams = GenerationParams {
        temperature: 0.3,
        top_p: 0.95,
        top_k: 40,
        max_tokens: 1024,
    };

    /// Query topic/keyword analysis.
    pub const ANALYSIS: GenerationParams = GenerationParams {
        temperature: 0.1,
        top_p: 0.8,
        top_k: 20,
        max_tokens: 1024,
    };
}

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    Gemini,
    Ollama,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!(ProviderType::parse("gemini"), Some(ProviderType::Gemini));
        assert_eq!(ProviderType::parse("google"), Some(ProviderType::Gemini));
        assert_eq!(ProviderType::parse("Ollama"), Some(ProviderType::Ollama));
        assert_eq!(ProviderType::parse("unknown"), None);
    }

    #[test]
    fn test_profiles_are_distinct() {
        assert_ne!(
            GenerationParams::EXTRACTION,
            GenerationParams::SYNTHESIS
        );
        assert_eq!(GenerationParams::ANALYSIS.top_k, 20);
        assert_eq!(GenerationParams::GENERAL.max_tokens, 1024);
    }
}
