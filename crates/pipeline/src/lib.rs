//! Retrieval and synthesis pipeline for the admissions advisor.
//!
//! The flow for one query:
//! 1. `classifier` answers greetings, small talk, and off-topic queries from
//!    canned pools without touching the index.
//! 2. `analysis` runs one cheap generation call to name the topic and the
//!    source files most likely to answer.
//! 3. `scheduler` builds one extraction task per source file (`task`,
//!    `context`) and fans them out over a small worker pool (`worker`).
//! 4. `ranker` orders the extractions by query-term overlap.
//! 5. `synthesis` merges the top results into the final reply, with a
//!    citation fallback and a general-knowledge tier underneath.
//!
//! `pipeline::Pipeline` ties the stages together and always returns a
//! displayable answer string.

pub mod analysis;
pub mod classifier;
pub mod context;
pub mod pipeline;
pub mod ranker;
mod responses;
pub mod scheduler;
pub mod synthesis;
pub mod task;
pub mod worker;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests;

// Re-export main types
pub use analysis::{analyze_query, file_priorities, QueryAnalysis};
pub use classifier::{Intent, QueryClassifier};
pub use pipeline::{Pipeline, SEARCH_ERROR_MESSAGE};
pub use ranker::{RankedResult, RelevanceRanker};
pub use scheduler::TaskScheduler;
pub use synthesis::{SynthesisStage, NO_RESULTS_MESSAGE};
pub use task::{Task, TaskOutput, TaskStatus};
pub use worker::Worker;
