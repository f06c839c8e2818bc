//! Extraction workers.
//!
//! A worker takes one task, asks the generation service to pull the facts
//! relevant to the query out of the task's context, and scores the reply.
//! Workers never return errors; a failed call marks the task failed and the
//! scheduler carries on with the rest.

use std::sync::Arc;

use advisor_llm::{GenerationClient, GenerationParams, GenerationRequest};
use advisor_prompt::extraction_prompt;

use crate::ranker::RelevanceRanker;
use crate::task::{Task, TaskOutput};

pub struct Worker {
    worker_id: String,
    client: Arc<dyn GenerationClient>,
    model: String,
}

impl Worker {
    pub fn new(
        worker_id: impl Into<String>,
        client: Arc<dyn GenerationClient>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            worker_id: worker_id.into(),
            client,
            model: model.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.worker_id
    }

    /// Run one task to a terminal state.
    pub async fn process(&self, mut task: Task, ranker: &RelevanceRanker) -> Task {
        task.mark_processing();
        tracing::debug!(
            worker = %self.worker_id,
            task = %task.task_id,
            source = %task.source_file,
            "Worker picked up task"
        );

        let prompt = match extraction_prompt(&task.query, &task.context) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!(task = %task.task_id, error = %e, "Could not build extraction prompt");
                task.mark_failed(e.to_string());
                return task;
            }
        };

        let request =
            GenerationRequest::new(prompt, &self.model).with_params(GenerationParams::EXTRACTION);
        match self.client.generate(&request).await {
            Ok(response) => {
                let relevance_score = ranker.score(&response.content, &task.query);
                tracing::debug!(
                    task = %task.task_id,
                    relevance_score,
                    reply_chars = response.content.chars().count(),
                    "Extraction completed"
                );
                task.mark_completed(TaskOutput {
                    content: response.content,
                    source_file: task.source_file.clone(),
                    relevance_score,
                });
            }
            Err(e) => {
                tracing::warn!(task = %task.task_id, error = %e, "Extraction call failed");
                task.mark_failed(e.to_string());
            }
        }
        task
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("worker_id", &self.worker_id)
            .field("model", &self.model)
            .field("provider", &self.client.provider_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use crate::test_support::MockGenerationClient;

    #[tokio::test]
    async fn test_successful_extraction_completes_task() {
        let client = Arc::new(MockGenerationClient::new());
        client.queue_ok("Học phí ngành Luật là 20 triệu đồng một năm.");
        let worker = Worker::new("worker-0", client.clone(), "gemini-2.0-flash");
        let ranker = RelevanceRanker::new().unwrap();

        let task = Task::new(
            "task-1",
            "học phí ngành luật",
            "### HỌC PHÍ ### ngành Luật: 20 triệu đồng một năm",
            "hoc_phi_hoc_bong.pdf",
        );
        let done = worker.process(task, &ranker).await;

        assert_eq!(done.status, TaskStatus::Completed);
        let output = done.output.unwrap();
        assert_eq!(output.source_file, "hoc_phi_hoc_bong.pdf");
        assert!(output.relevance_score > 0.9);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_extraction_uses_cold_sampling_profile() {
        let client = Arc::new(MockGenerationClient::new());
        client.queue_ok("Không tìm thấy thông tin liên quan.");
        let worker = Worker::new("worker-0", client.clone(), "gemini-2.0-flash");
        let ranker = RelevanceRanker::new().unwrap();

        let task = Task::new("task-1", "học phí", "văn bản", "diem_chuan.pdf");
        let done = worker.process(task, &ranker).await;

        // A no-information reply still completes, scored zero.
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.output.unwrap().relevance_score, 0.0);

        let request = &client.requests()[0];
        assert_eq!(request.temperature, Some(0.1));
        assert_eq!(request.max_tokens, Some(2048));
        assert!(request.prompt.contains("học phí"));
    }

    #[tokio::test]
    async fn test_failed_call_marks_task_failed() {
        let client = Arc::new(MockGenerationClient::new());
        client.queue_err("service unavailable");
        let worker = Worker::new("worker-1", client, "gemini-2.0-flash");
        let ranker = RelevanceRanker::new().unwrap();

        let task = Task::new("task-2", "điểm chuẩn", "văn bản", "diem_chuan.pdf");
        let done = worker.process(task, &ranker).await;

        assert_eq!(done.status, TaskStatus::Failed);
        assert!(done.output.is_none());
        assert!(done.error.unwrap().contains("service unavailable"));
    }
}
