//! Keyword relevance scoring for extracted answers.

use std::collections::HashSet;

use advisor_core::{AppError, AppResult};
use regex::Regex;

use crate::task::{Task, TaskStatus};

/// Extraction replies that found nothing start with this phrase. They score
/// zero and never reach synthesis.
pub const NO_INFO_SENTINEL: &str = "Không tìm thấy thông tin liên quan";

/// Vietnamese function words ignored when matching query terms.
const STOPWORDS: &[&str] = &[
    "và", "của", "là", "cho", "trong", "về", "từ", "với", "đến", "tại", "một", "các", "những",
    "này", "đó", "nên", "khi", "thì", "được", "bằng", "có", "đã", "sẽ", "còn", "vẫn",
];

/// A completed extraction ordered for synthesis.
#[derive(Debug, Clone)]
pub struct RankedResult {
    pub content: String,
    pub source_file: String,
    pub relevance_score: f32,
}

/// Scores extraction output by query-term overlap.
#[derive(Debug)]
pub struct RelevanceRanker {
    word_re: Regex,
    digit_re: Regex,
}

impl RelevanceRanker {
    pub fn new() -> AppResult<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| AppError::Task(format!("invalid ranking pattern {pattern:?}: {e}")))
        };
        Ok(Self {
            word_re: compile(r"\w+")?,
            digit_re: compile(r"\d+")?,
        })
    }

    /// Fraction of non-stopword query terms present in the content, with a
    /// 1.2x boost when the content carries numbers, capped at 1.0.
    pub fn score(&self, content: &str, query: &str) -> f32 {
        if content.contains(NO_INFO_SENTINEL) {
            return 0.0;
        }

        let query_lower = query.to_lowercase();
        let query_words: HashSet<&str> = self
            .word_re
            .find_iter(&query_lower)
            .map(|m| m.as_str())
            .filter(|w| !STOPWORDS.contains(w))
            .collect();
        if query_words.is_empty() {
            return 0.0;
        }

        let content_lower = content.to_lowercase();
        let matches = query_words
            .iter()
            .filter(|word| content_lower.contains(**word))
            .count();
        let mut relevance = matches as f32 / query_words.len() as f32;

        if self.digit_re.is_match(content) {
            relevance *= 1.2;
        }
        relevance.min(1.0)
    }

    /// Keep the completed tasks that produced usable content, ordered by
    /// score, highest first. The sort is stable, so equal scores keep their
    /// dispatch order.
    pub fn rank(&self, tasks: &[Task]) -> Vec<RankedResult> {
        let mut results: Vec<RankedResult> = tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .filter_map(|task| task.output.as_ref())
            .filter(|output| !output.content.contains(NO_INFO_SENTINEL))
            .map(|output| RankedResult {
                content: output.content.clone(),
                source_file: output.source_file.clone(),
                relevance_score: output.relevance_score,
            })
            .collect();

        results.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskOutput;

    fn ranker() -> RelevanceRanker {
        RelevanceRanker::new().unwrap()
    }

    fn completed_task(id: &str, content: &str, relevance_score: f32) -> Task {
        let mut task = Task::new(id, "học phí", "ctx", "hoc_phi_hoc_bong.pdf");
        task.mark_processing();
        task.mark_completed(TaskOutput {
            content: content.to_string(),
            source_file: "hoc_phi_hoc_bong.pdf".to_string(),
            relevance_score,
        });
        task
    }

    #[test]
    fn test_score_no_info_reply_is_zero() {
        let score = ranker().score(
            "Không tìm thấy thông tin liên quan trong tài liệu này.",
            "học phí",
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_score_full_match_with_numbers_caps_at_one() {
        let score = ranker().score("Học phí ngành Luật là 20 triệu đồng.", "học phí ngành luật");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_score_partial_match_without_numbers() {
        let score = ranker().score("Ngành luật đào tạo cử nhân.", "học phí ngành luật");
        assert!((score - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_score_stopword_only_query_is_zero() {
        assert_eq!(ranker().score("Học phí là 20 triệu.", "và của là"), 0.0);
    }

    #[test]
    fn test_rank_filters_and_orders_by_score() {
        let mut failed = Task::new("task-3", "học phí", "ctx", "diem_chuan.pdf");
        failed.mark_failed("timeout");

        let tasks = vec![
            completed_task("task-1", "B: một học kỳ khoảng 10 triệu.", 0.3),
            completed_task("task-2", "A: mỗi tín chỉ 850 nghìn đồng.", 0.9),
            failed,
            completed_task("task-4", "Không tìm thấy thông tin liên quan.", 0.8),
        ];

        let ranked = ranker().rank(&tasks);
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].content.starts_with("A:"));
        assert!(ranked[1].content.starts_with("B:"));
    }

    #[test]
    fn test_rank_keeps_dispatch_order_on_equal_scores() {
        let tasks = vec![
            completed_task("task-1", "Nguồn một: học phí 10 triệu.", 0.6),
            completed_task("task-2", "Nguồn hai: học phí 12 triệu.", 0.6),
            completed_task("task-3", "Nguồn ba: học phí 15 triệu.", 0.6),
        ];

        let ranked = ranker().rank(&tasks);
        assert_eq!(ranked.len(), 3);
        assert!(ranked[0].content.starts_with("Nguồn một"));
        assert!(ranked[1].content.starts_with("Nguồn hai"));
        assert!(ranked[2].content.starts_with("Nguồn ba"));
    }
}
