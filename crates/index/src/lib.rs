//! Document index for the admissions advisor.
//!
//! This crate owns the in-memory similarity index over document chunks:
//! - Chunk and category model (`types`)
//! - Embedding providers (`embeddings`): local hashed encoder and Ollama
//! - Priority-ordered, widening similarity search (`index`)
//!
//! Chunks are tagged with a coarse topic category derived from their source
//! file name; searches scan categories in query-dependent priority order
//! and widen to the full corpus only when the prioritized scan comes up
//! short.

pub mod embeddings;
pub mod index;
pub mod types;

// Re-export main types
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use index::{detect_category_priorities, DocumentIndex};
pub use types::{
    Category, DocumentChunk, SearchHit, EMPTY_INDEX_MESSAGE, NO_MATCH_MESSAGE,
};
