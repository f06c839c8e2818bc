//! Cross-module pipeline scenarios.

mod answer_flow;
