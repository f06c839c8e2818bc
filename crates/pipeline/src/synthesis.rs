//! Final answer synthesis.
//!
//! Merges the ranked extractions into one generation call. When that call
//! fails or comes back empty, the best extraction is returned as-is with a
//! source citation, so a reachable answer is never lost to a flaky service.

use std::sync::Arc;

use advisor_core::AppResult;
use advisor_llm::{GenerationClient, GenerationParams, GenerationRequest};
use advisor_prompt::{general_prompt, synthesis_prompt};

use crate::ranker::RankedResult;

/// Returned when no task produced usable content.
pub const NO_RESULTS_MESSAGE: &str =
    "Xin lỗi, tôi không tìm thấy thông tin liên quan đến câu hỏi của bạn trong các tài liệu hiện có.";

/// Guard message for a fallback with nothing to fall back on.
pub const CANNOT_SYNTHESIZE_MESSAGE: &str =
    "Xin lỗi, tôi không thể tổng hợp thông tin để trả lời câu hỏi của bạn.";

/// How many ranked results feed the synthesis prompt.
const TOP_RESULTS: usize = 5;

/// Strip the upload prefix from a stored file name for citations.
/// Uploaded files are stored as `{uuid}_{original_name}`.
pub fn display_source_name(file_name: &str) -> String {
    if file_name.contains('-') {
        if let Some((_, original)) = file_name.split_once('_') {
            return original.to_string();
        }
    }
    file_name.to_string()
}

pub struct SynthesisStage {
    client: Arc<dyn GenerationClient>,
    model: String,
}

impl SynthesisStage {
    pub fn new(client: Arc<dyn GenerationClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Merge the top ranked results into a final reply.
    ///
    /// Always returns an answer: an empty result list gets the no-results
    /// message, and a failed synthesis call degrades to the best single
    /// extraction plus its citation.
    pub async fn synthesize(&self, query: &str, topic: &str, ranked: &[RankedResult]) -> String {
        if ranked.is_empty() {
            return NO_RESULTS_MESSAGE.to_string();
        }

        let top = &ranked[..ranked.len().min(TOP_RESULTS)];
        let mut contents: Vec<&str> = Vec::with_capacity(top.len());
        let mut sources: Vec<String> = Vec::new();
        for result in top {
            contents.push(result.content.as_str());
            let name = display_source_name(&result.source_file);
            if !sources.contains(&name) {
                sources.push(name);
            }
        }
        let combined = contents.join("\n\n---\n\n");
        let citation = sources.join(", ");

        let prompt = match synthesis_prompt(query, topic, &combined) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!(error = %e, "Could not build synthesis prompt");
                return citation_fallback(ranked, &citation);
            }
        };

        let request =
            GenerationRequest::new(prompt, &self.model).with_params(GenerationParams::SYNTHESIS);
        match self.client.generate(&request).await {
            Ok(response) if !response.content.is_empty() => response.content,
            Ok(_) => {
                tracing::debug!("Synthesis reply was empty, returning best extraction");
                citation_fallback(ranked, &citation)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Synthesis call failed, returning best extraction");
                citation_fallback(ranked, &citation)
            }
        }
    }

    /// Answer from the model's general knowledge, flagged as such.
    ///
    /// Used when the corpus has nothing for the query. The reply gets a
    /// heading, an apology, and a provenance note unless it already carries
    /// them.
    pub async fn general_answer(&self, query: &str) -> AppResult<String> {
        let prompt = general_prompt(query)?;
        let request =
            GenerationRequest::new(prompt, &self.model).with_params(GenerationParams::GENERAL);
        let response = self.client.generate(&request).await?;

        let mut content = response.content;
        if content.is_empty() {
            return Ok(content);
        }

        if !first_chars(&content, 100).to_lowercase().contains("<h4") {
            content = format!("<h4>Thông tin chung</h4>\n{content}");
        }
        if !content.to_lowercase().contains("không tìm thấy") {
            content = format!(
                "<p><i>Xin lỗi, tôi không tìm thấy thông tin cụ thể về câu hỏi này trong các tài liệu của trường.</i></p>\n{content}"
            );
        }
        if !last_chars(&content, 200).to_lowercase().contains("<small>") {
            content.push_str(
                "\n\n<small><i>Lưu ý: Câu trả lời này dựa trên kiến thức chung, không phải từ tài liệu chính thức của trường.</i></small>",
            );
        }
        Ok(content)
    }
}

fn citation_fallback(ranked: &[RankedResult], citation: &str) -> String {
    match ranked.first() {
        Some(best) => format!(
            "{}\n\n<small><i>Thông tin được tìm thấy trong: {}</i></small>",
            best.content, citation
        ),
        None => CANNOT_SYNTHESIZE_MESSAGE.to_string(),
    }
}

fn first_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn last_chars(s: &str, n: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(n)).collect()
}

impl std::fmt::Debug for SynthesisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisStage")
            .field("model", &self.model)
            .field("provider", &self.client.provider_name())
            .finish()
    }
}
