//! Task scheduling across the worker pool.
//!
//! One task per source file, ordered by the analyzed file priorities, then
//! dealt round-robin to the workers. Each worker drains its own queue
//! sequentially while the queues run concurrently, so one slow source never
//! stalls the others and no worker hits the generation service with two
//! calls at once.

use std::sync::Arc;

use advisor_core::AppResult;
use advisor_llm::GenerationClient;
use futures::future::join_all;

use crate::analysis::{analyze_query, file_priorities, QueryAnalysis};
use crate::context::ContextNormalizer;
use crate::ranker::RelevanceRanker;
use crate::synthesis::SynthesisStage;
use crate::task::Task;
use crate::worker::Worker;

/// Queries about programming itself have no answer in admissions documents;
/// they go straight to the general-knowledge tier.
const TECHNICAL_TERMS: &[&str] = &[
    "python",
    "code",
    "function",
    "programming",
    "javascript",
    "hàm",
    "lập trình",
    "web",
    "algorithm",
    "thuật toán",
];

/// Multi-word terms match as substrings; single words must match a whole
/// word, so "web" never fires on "website".
fn is_technical_query(query: &str) -> bool {
    let query_lower = query.to_lowercase();
    let words: Vec<&str> = query_lower.split_whitespace().collect();
    TECHNICAL_TERMS.iter().any(|term| {
        if term.contains(' ') {
            query_lower.contains(term)
        } else {
            words.iter().any(|word| word == term)
        }
    })
}

/// Deal items into `worker_count` queues round-robin, remembering each
/// item's dispatch sequence.
fn partition_round_robin<T>(items: Vec<T>, worker_count: usize) -> Vec<Vec<(usize, T)>> {
    let mut queues: Vec<Vec<(usize, T)>> = (0..worker_count).map(|_| Vec::new()).collect();
    for (i, item) in items.into_iter().enumerate() {
        queues[i % worker_count].push((i, item));
    }
    queues
}

/// Coordinates analysis, extraction, ranking, and synthesis for one query.
pub struct TaskScheduler {
    client: Arc<dyn GenerationClient>,
    model: String,
    workers: Vec<Worker>,
    ranker: RelevanceRanker,
    normalizer: ContextNormalizer,
    synthesis: SynthesisStage,
}

impl TaskScheduler {
    pub fn new(
        client: Arc<dyn GenerationClient>,
        model: impl Into<String>,
        worker_count: usize,
    ) -> AppResult<Self> {
        let model = model.into();
        let workers = (0..worker_count.max(1))
            .map(|i| Worker::new(format!("worker-{i}"), client.clone(), model.as_str()))
            .collect();
        Ok(Self {
            workers,
            synthesis: SynthesisStage::new(client.clone(), model.as_str()),
            ranker: RelevanceRanker::new()?,
            normalizer: ContextNormalizer::new()?,
            client,
            model,
        })
    }

    /// Run the full document flow for a query. Always produces an answer.
    ///
    /// `documents` and `file_sources` are parallel slices: one chunk text and
    /// the file it came from.
    pub async fn process(
        &self,
        query: &str,
        documents: &[String],
        file_sources: &[String],
    ) -> String {
        if is_technical_query(query) {
            tracing::info!("Technical query, answering from general knowledge");
            match self.synthesis.general_answer(query).await {
                Ok(answer) if answer.chars().count() > 20 => return answer,
                Ok(_) => {
                    tracing::warn!("General answer too short, running the document flow instead")
                }
                Err(e) => {
                    tracing::warn!(error = %e, "General answer failed, running the document flow instead")
                }
            }
        }

        let analysis = analyze_query(self.client.as_ref(), &self.model, query).await;
        tracing::info!(topic = %analysis.topic, "Query analysis finished");

        let tasks = self.create_tasks(query, documents, file_sources, &analysis);
        tracing::info!(task_count = tasks.len(), "Created extraction tasks");

        let completed = self.execute_tasks(tasks).await;
        let ranked = self.ranker.rank(&completed);
        tracing::info!(result_count = ranked.len(), "Ranked worker results");

        let mut final_answer = self
            .synthesis
            .synthesize(query, &analysis.topic, &ranked)
            .await;

        // Nothing usable in the documents: try the general-knowledge tier,
        // keeping the document answer when that fails too.
        if ranked.is_empty()
            || final_answer
                .to_lowercase()
                .contains("không tìm thấy thông tin")
        {
            tracing::info!("Documents had nothing relevant, trying general knowledge");
            match self.synthesis.general_answer(query).await {
                Ok(answer) if answer.chars().count() > 20 => final_answer = answer,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "General answer failed, keeping document answer")
                }
            }
        }
        final_answer
    }

    /// One task per source file, priority files first.
    fn create_tasks(
        &self,
        query: &str,
        documents: &[String],
        file_sources: &[String],
        analysis: &QueryAnalysis,
    ) -> Vec<Task> {
        let priorities = file_priorities(analysis);

        // Group chunk texts per source, keeping first-seen order.
        let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
        for (doc, source) in documents.iter().zip(file_sources) {
            if source.is_empty() {
                continue;
            }
            match grouped.iter_mut().find(|(name, _)| name == source) {
                Some((_, docs)) => docs.push(doc.clone()),
                None => grouped.push((source.clone(), vec![doc.clone()])),
            }
        }

        let mut ordered: Vec<&(String, Vec<String>)> = Vec::with_capacity(grouped.len());
        for file_name in &priorities {
            if let Some(entry) = grouped.iter().find(|(name, _)| name == file_name) {
                ordered.push(entry);
            }
        }
        for entry in &grouped {
            if !priorities.contains(&entry.0) {
                ordered.push(entry);
            }
        }

        ordered
            .iter()
            .enumerate()
            .map(|(i, (source, docs))| {
                let context = self.normalizer.build_task_context(docs);
                Task::new(format!("task-{i}"), query, context, source.as_str())
            })
            .collect()
    }

    /// Run tasks on the worker pool and return them in dispatch order.
    async fn execute_tasks(&self, tasks: Vec<Task>) -> Vec<Task> {
        if tasks.is_empty() {
            return Vec::new();
        }

        let queues = partition_round_robin(tasks, self.workers.len());
        let jobs = self.workers.iter().zip(queues).map(|(worker, queue)| async move {
            let mut done = Vec::with_capacity(queue.len());
            for (seq, task) in queue {
                let task = worker.process(task, &self.ranker).await;
                done.push((seq, task));
            }
            done
        });

        let mut finished: Vec<(usize, Task)> = join_all(jobs).await.into_iter().flatten().collect();
        // Dispatch order makes ranking ties deterministic.
        finished.sort_by_key(|(seq, _)| *seq);
        finished.into_iter().map(|(_, task)| task).collect()
    }
}

impl std::fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("model", &self.model)
            .field("provider", &self.client.provider_name())
            .field("workers", &self.workers.len())
            .finish()
    }
}
