//! Per-query retrieval tasks.
//!
//! A task carries one source file's context through a worker. Tasks are
//! created fresh for every query and never reused.

use chrono::{DateTime, Utc};

/// Lifecycle of a task: `Pending -> Processing -> {Completed | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Result payload of a completed task.
#[derive(Debug, Clone)]
pub struct TaskOutput {
    pub content: String,
    pub source_file: String,
    pub relevance_score: f32,
}

/// One extraction job scoped to a single source file.
#[derive(Debug, Clone)]
pub struct Task {
    pub task_id: String,
    pub query: String,
    pub context: String,
    pub source_file: String,
    pub status: TaskStatus,
    pub output: Option<TaskOutput>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(
        task_id: impl Into<String>,
        query: impl Into<String>,
        context: impl Into<String>,
        source_file: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            query: query.into(),
            context: context.into(),
            source_file: source_file.into(),
            status: TaskStatus::Pending,
            output: None,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn mark_processing(&mut self) {
        self.status = TaskStatus::Processing;
    }

    pub fn mark_completed(&mut self, output: TaskOutput) {
        self.status = TaskStatus::Completed;
        self.output = Some(output);
        self.completed_at = Some(Utc::now());
    }

    pub fn mark_failed(&mut self, error: impl Into<String>) {
        self.status = TaskStatus::Failed;
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
    }

    /// Whether the task has reached a final state.
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, TaskStatus::Completed | TaskStatus::Failed)
    }
}
