//! Prompt system for the admissions advisor.
//!
//! This crate provides the Handlebars templates behind every
//! generation-service call the pipeline makes: per-source extraction,
//! answer synthesis, the general-knowledge fallback, and query analysis.

pub mod builder;
pub mod templates;

// Re-export main entry points
pub use builder::{
    analysis_prompt, extraction_prompt, general_prompt, render_template, synthesis_prompt,
};
