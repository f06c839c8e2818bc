//! Query entry point.
//!
//! `Pipeline::answer_query` is the one call the outside world makes: gate
//! conversational queries, search the index, and hand relevant passages to
//! the scheduler. Whatever happens inside, the caller gets a displayable
//! answer string.

use std::sync::Arc;

use advisor_core::config::PipelineConfig;
use advisor_core::AppResult;
use advisor_index::{DocumentIndex, EMPTY_INDEX_MESSAGE};
use advisor_llm::GenerationClient;

use crate::classifier::QueryClassifier;
use crate::scheduler::TaskScheduler;

/// Returned when the similarity search itself errors.
pub const SEARCH_ERROR_MESSAGE: &str =
    "Xin lỗi, đã xảy ra lỗi khi tìm kiếm thông tin liên quan.";

pub struct Pipeline {
    classifier: QueryClassifier,
    scheduler: TaskScheduler,
    search_k: usize,
    search_threshold: f32,
}

impl Pipeline {
    pub fn new(
        client: Arc<dyn GenerationClient>,
        model: impl Into<String>,
        config: &PipelineConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            classifier: QueryClassifier::new()?,
            scheduler: TaskScheduler::new(client, model, config.workers)?,
            search_k: config.search_k,
            search_threshold: config.search_threshold,
        })
    }

    /// Answer a user query against the indexed documents.
    ///
    /// Conversational and off-topic queries are answered without touching
    /// the index. An empty index is reported as-is so callers can prompt
    /// for ingestion. Search hits feed the extraction workers; sentinel
    /// hits never do.
    pub async fn answer_query(&self, query: &str, index: &DocumentIndex) -> String {
        if let Some(reply) = self.classifier.respond(query, &mut rand::thread_rng()) {
            tracing::info!("Answered conversationally");
            return reply;
        }

        let hits = match index
            .search(query, self.search_k, self.search_threshold)
            .await
        {
            Ok(hits) => hits,
            Err(e) => {
                tracing::error!(error = %e, "Similarity search failed");
                return SEARCH_ERROR_MESSAGE.to_string();
            }
        };

        if let Some(first) = hits.first() {
            if first.is_sentinel() && first.text == EMPTY_INDEX_MESSAGE {
                return first.text.clone();
            }
        }

        let mut documents = Vec::with_capacity(hits.len());
        let mut sources = Vec::with_capacity(hits.len());
        for hit in hits.into_iter().filter(|hit| !hit.is_sentinel()) {
            documents.push(hit.text);
            sources.push(hit.source_file);
        }

        self.scheduler.process(query, &documents, &sources).await
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("search_k", &self.search_k)
            .field("search_threshold", &self.search_threshold)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockGenerationClient;
    use advisor_index::embeddings::{create_provider, EmbeddingConfig};

    fn test_config() -> PipelineConfig {
        PipelineConfig {
            workers: 3,
            search_k: 5,
            search_threshold: 0.05,
            embedding_provider: "hashed".to_string(),
            embedding_dimensions: 384,
        }
    }

    fn empty_index() -> DocumentIndex {
        let provider = create_provider(&EmbeddingConfig::default()).unwrap();
        DocumentIndex::new(provider)
    }

    async fn populated_index() -> DocumentIndex {
        let mut index = empty_index();
        index
            .add(
                vec![
                    "Học phí ngành Luật năm 2025 là 20 triệu đồng mỗi năm học.".to_string(),
                    "Sinh viên đóng học phí theo từng học kỳ.".to_string(),
                ],
                "hoc_phi_hoc_bong.pdf",
            )
            .await
            .unwrap();
        index
            .add(
                vec!["Điểm chuẩn ngành Luật năm 2024 là 24.25 điểm.".to_string()],
                "diem_chuan.pdf",
            )
            .await
            .unwrap();
        index
    }

    #[tokio::test]
    async fn test_empty_index_reports_missing_knowledge_base() {
        let client = Arc::new(MockGenerationClient::new());
        let pipeline = Pipeline::new(client.clone(), "gemini-2.0-flash", &test_config()).unwrap();

        let answer = pipeline
            .answer_query("học phí ngành luật bao nhiêu", &empty_index())
            .await;

        assert_eq!(answer, EMPTY_INDEX_MESSAGE);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_greeting_never_touches_index_or_service() {
        let client = Arc::new(MockGenerationClient::new());
        let pipeline = Pipeline::new(client.clone(), "gemini-2.0-flash", &test_config()).unwrap();

        let answer = pipeline.answer_query("xin chào", &empty_index()).await;

        assert!(answer.contains("tư vấn tuyển sinh"));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_tuition_query_answers_from_documents() {
        let client = Arc::new(MockGenerationClient::new());
        client.queue_ok(r#"{"chủ_đề": "học phí", "từ_khóa": ["học phí"], "file_ưu_tiên": ""}"#);
        client.queue_ok("Học phí ngành Luật là 20 triệu đồng mỗi năm.");
        client.queue_err("quota exceeded");
        let pipeline = Pipeline::new(client.clone(), "gemini-2.0-flash", &test_config()).unwrap();

        // One source file, so the call order is analysis, extraction,
        // synthesis.
        let mut index = empty_index();
        index
            .add(
                vec!["Học phí ngành Luật năm 2025 là 20 triệu đồng mỗi năm học.".to_string()],
                "hoc_phi_hoc_bong.pdf",
            )
            .await
            .unwrap();
        let answer = pipeline
            .answer_query("học phí ngành luật bao nhiêu", &index)
            .await;

        // Synthesis failed, so the best extraction comes back with its
        // citation attached.
        assert!(answer.contains("20 triệu"));
        assert!(answer.contains("Thông tin được tìm thấy trong: hoc_phi_hoc_bong.pdf"));
    }

    #[tokio::test]
    async fn test_every_stage_failing_still_produces_an_answer() {
        let client = Arc::new(MockGenerationClient::new());
        client.queue_err("analysis down");
        client.queue_err("worker down");
        client.queue_err("worker down");
        client.queue_err("general down");
        let pipeline = Pipeline::new(client.clone(), "gemini-2.0-flash", &test_config()).unwrap();

        let index = populated_index().await;
        let answer = pipeline
            .answer_query("học phí ngành luật bao nhiêu", &index)
            .await;

        // All failed tasks leave nothing to synthesize and the general tier
        // is down too, so the no-results message is the floor.
        assert!(!answer.is_empty());
        assert!(answer.contains("không tìm thấy thông tin"));
    }
}
