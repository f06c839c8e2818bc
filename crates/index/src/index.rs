//! In-memory document index with category-aware similarity search.
//!
//! Chunks are tagged with a [`Category`] derived from their source file at
//! ingestion. A search first scans categories the query appears to be about,
//! then widens to the rest of the corpus when too few chunks clear the
//! similarity threshold.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use advisor_core::{AppError, AppResult};

use crate::embeddings::EmbeddingProvider;
use crate::types::{
    Category, DocumentChunk, SearchHit, EMPTY_INDEX_MESSAGE, NO_MATCH_MESSAGE,
};

/// Keyword tables that route a query to the categories it is likely about.
/// Scanned top to bottom; every matching row is prioritized in table order.
const CATEGORY_TERMS: &[(Category, &[&str])] = &[
    (
        Category::ScoreThreshold,
        &["điểm", "điểm chuẩn", "điểm xét tuyển", "điểm trúng tuyển"],
    ),
    (
        Category::Tuition,
        &["học phí", "học bổng", "miễn giảm", "chi phí", "tiền học"],
    ),
    (
        Category::Program,
        &[
            "ngành",
            "chuyên ngành",
            "khoa",
            "chương trình",
            "đào tạo",
            "việc làm",
            "vị trí",
        ],
    ),
    (
        Category::Facilities,
        &[
            "cơ sở",
            "cơ sở vật chất",
            "địa điểm",
            "khuôn viên",
            "phòng học",
            "khu",
        ],
    ),
    (
        Category::Admissions,
        &[
            "tuyển sinh",
            "xét tuyển",
            "tuyển",
            "chỉ tiêu",
            "phương thức",
            "điều kiện",
        ],
    ),
];

/// Order categories by how relevant they look to the query.
///
/// Categories whose keyword table matches come first, in table order. The
/// remaining categories follow in the default order so the whole corpus stays
/// reachable. The result always lists all six categories exactly once.
pub fn detect_category_priorities(query: &str) -> Vec<Category> {
    let query_lower = query.to_lowercase();
    let mut priorities = Vec::new();

    for (category, terms) in CATEGORY_TERMS {
        if terms.iter().any(|term| query_lower.contains(term)) {
            priorities.push(*category);
        }
    }

    for category in Category::default_priority() {
        if !priorities.contains(&category) {
            priorities.push(category);
        }
    }

    priorities
}

/// Stores chunks and their embeddings, and answers similarity queries.
///
/// Mutation and reads are exclusive by construction (`&mut self` for
/// ingestion); the `embeddings.len() == chunks.len()` invariant holds
/// whenever a search can observe the index.
pub struct DocumentIndex {
    chunks: Vec<DocumentChunk>,
    embeddings: Vec<Vec<f32>>,
    source_chunks: BTreeMap<String, Vec<usize>>,
    source_categories: BTreeMap<String, Category>,
    provider: Arc<dyn EmbeddingProvider>,
}

impl DocumentIndex {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            chunks: Vec::new(),
            embeddings: Vec::new(),
            source_chunks: BTreeMap::new(),
            source_categories: BTreeMap::new(),
            provider,
        }
    }

    /// Number of chunks currently indexed.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All indexed chunks, in ingestion order.
    pub fn chunks(&self) -> &[DocumentChunk] {
        &self.chunks
    }

    /// Per-source overview: `(source_file, category, chunk_count)`, sorted by
    /// source file name.
    pub fn source_summary(&self) -> Vec<(String, Category, usize)> {
        self.source_chunks
            .iter()
            .map(|(source, ids)| {
                let category = self
                    .source_categories
                    .get(source)
                    .copied()
                    .unwrap_or(Category::Other);
                (source.clone(), category, ids.len())
            })
            .collect()
    }

    /// Append chunks for one source file and re-embed the whole corpus.
    ///
    /// The full rebuild keeps every embedding on the same encoder state; it
    /// is a documented scaling limit for corpora beyond a few thousand
    /// chunks. Nothing is committed if embedding fails, so a search never
    /// sees chunks without matching vectors.
    pub async fn add(&mut self, texts: Vec<String>, source_file: &str) -> AppResult<usize> {
        if texts.is_empty() {
            return Ok(0);
        }

        let category = Category::from_source_file(source_file);
        let first_id = self.chunks.len();

        let mut staged: Vec<DocumentChunk> = Vec::with_capacity(texts.len());
        for (offset, text) in texts.into_iter().enumerate() {
            staged.push(DocumentChunk {
                id: first_id + offset,
                text,
                source_file: source_file.to_string(),
                category,
            });
        }

        let mut all_texts: Vec<String> =
            self.chunks.iter().map(|chunk| chunk.text.clone()).collect();
        all_texts.extend(staged.iter().map(|chunk| chunk.text.clone()));

        let embeddings = self.provider.embed_batch(&all_texts).await?;
        if embeddings.len() != all_texts.len() {
            return Err(AppError::Index(format!(
                "Embedding provider returned {} vectors for {} chunks",
                embeddings.len(),
                all_texts.len()
            )));
        }

        let added = staged.len();
        let ids: Vec<usize> = staged.iter().map(|chunk| chunk.id).collect();
        self.chunks.extend(staged);
        self.embeddings = embeddings;
        self.source_chunks
            .entry(source_file.to_string())
            .or_default()
            .extend(ids);
        self.source_categories
            .insert(source_file.to_string(), category);

        tracing::info!(
            source = source_file,
            category = category.as_str(),
            added,
            total = self.chunks.len(),
            "Indexed chunks"
        );

        Ok(added)
    }

    /// Find up to `k` chunks scoring at least `threshold` against the query.
    ///
    /// Scans categories in priority order, stopping early once `k` chunks are
    /// selected and the latest category produced a strong best score (at
    /// least twice the threshold). If the prioritized scan comes up short,
    /// the remaining corpus is ranked to fill the open slots. Returns a
    /// single sentinel hit when the index is empty or nothing clears the
    /// threshold.
    pub async fn search(
        &self,
        query: &str,
        k: usize,
        threshold: f32,
    ) -> AppResult<Vec<SearchHit>> {
        if self.chunks.is_empty() {
            tracing::warn!("Search requested but no documents are indexed");
            return Ok(vec![SearchHit::sentinel(EMPTY_INDEX_MESSAGE)]);
        }

        let query_embedding = self.provider.embed(query).await?;
        let priorities = detect_category_priorities(query);
        tracing::debug!(?priorities, k, threshold, "Scanning categories");

        let mut selected: Vec<(usize, f32)> = Vec::new();
        let mut selected_ids: HashSet<usize> = HashSet::new();

        for category in &priorities {
            let ranked = self.rank_category(*category, &query_embedding, threshold);
            let best = ranked.first().map(|(_, score)| *score);

            for (idx, score) in ranked {
                if selected.len() >= k {
                    break;
                }
                if selected_ids.insert(idx) {
                    selected.push((idx, score));
                }
            }

            if selected.len() >= k {
                if let Some(best) = best {
                    if best >= threshold * 2.0 {
                        tracing::debug!(
                            category = category.as_str(),
                            selected = selected.len(),
                            "Strong match, stopping category scan"
                        );
                        break;
                    }
                }
            }
        }

        if selected.len() < k {
            let mut remaining: Vec<(usize, f32)> = self
                .embeddings
                .iter()
                .enumerate()
                .filter(|(idx, _)| !selected_ids.contains(idx))
                .map(|(idx, embedding)| (idx, cosine_similarity(&query_embedding, embedding)))
                .filter(|(_, score)| *score >= threshold)
                .collect();
            remaining.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

            for (idx, score) in remaining {
                if selected.len() >= k {
                    break;
                }
                if selected_ids.insert(idx) {
                    selected.push((idx, score));
                }
            }
        }

        if selected.is_empty() {
            tracing::info!(threshold, "No chunk cleared the similarity threshold");
            return Ok(vec![SearchHit::sentinel(NO_MATCH_MESSAGE)]);
        }

        let hits: Vec<SearchHit> = selected
            .into_iter()
            .map(|(idx, score)| {
                let chunk = &self.chunks[idx];
                tracing::debug!(
                    source = chunk.source_file.as_str(),
                    score,
                    "Search hit"
                );
                SearchHit {
                    text: chunk.text.clone(),
                    source_file: chunk.source_file.clone(),
                    score,
                }
            })
            .collect();

        Ok(hits)
    }

    /// Score all chunks of one category against the query embedding and
    /// return those at or above the threshold, best first.
    fn rank_category(
        &self,
        category: Category,
        query_embedding: &[f32],
        threshold: f32,
    ) -> Vec<(usize, f32)> {
        let mut ranked: Vec<(usize, f32)> = self
            .chunks
            .iter()
            .enumerate()
            .filter(|(_, chunk)| chunk.category == category)
            .map(|(idx, _)| (idx, cosine_similarity(query_embedding, &self.embeddings[idx])))
            .filter(|(_, score)| *score >= threshold)
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

impl std::fmt::Debug for DocumentIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentIndex")
            .field("chunks", &self.chunks.len())
            .field("sources", &self.source_chunks.len())
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{create_provider, EmbeddingConfig};

    fn test_index() -> DocumentIndex {
        let provider = create_provider(&EmbeddingConfig::default()).unwrap();
        DocumentIndex::new(provider)
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        // Mismatched lengths and zero vectors degrade to no similarity
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_detect_priorities_for_tuition_query() {
        let priorities = detect_category_priorities("Học phí một học kỳ bao nhiêu tiền?");
        assert_eq!(priorities[0], Category::Tuition);
        assert_eq!(priorities.len(), 6);
    }

    #[test]
    fn test_detect_priorities_orders_multiple_matches() {
        let priorities = detect_category_priorities("điểm chuẩn và học phí ngành luật");
        assert_eq!(
            priorities,
            vec![
                Category::ScoreThreshold,
                Category::Tuition,
                Category::Program,
                Category::Admissions,
                Category::Facilities,
                Category::Other,
            ]
        );
    }

    #[test]
    fn test_detect_priorities_falls_back_to_default_order() {
        let priorities = detect_category_priorities("cho mình hỏi một chút");
        assert_eq!(priorities, Category::default_priority().to_vec());
    }

    #[tokio::test]
    async fn test_empty_index_returns_sentinel() {
        let index = test_index();
        let hits = index.search("học phí bao nhiêu", 5, 0.001).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].is_sentinel());
        assert_eq!(hits[0].text, EMPTY_INDEX_MESSAGE);
    }

    #[tokio::test]
    async fn test_add_assigns_ids_and_categories() {
        let mut index = test_index();
        let added = index
            .add(
                vec![
                    "Điểm chuẩn ngành Luật năm 2025 là 24.5 điểm.".to_string(),
                    "Điểm chuẩn ngành Công nghệ thông tin là 23 điểm.".to_string(),
                ],
                "diem_chuan.pdf",
            )
            .await
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(index.len(), 2);
        assert_eq!(index.chunks()[0].id, 0);
        assert_eq!(index.chunks()[1].id, 1);
        assert_eq!(index.chunks()[0].category, Category::ScoreThreshold);

        index
            .add(
                vec!["Học phí khoảng 24 triệu đồng mỗi năm học.".to_string()],
                "hoc_phi_hoc_bong.pdf",
            )
            .await
            .unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.chunks()[2].id, 2);
        assert_eq!(index.chunks()[2].category, Category::Tuition);

        let summary = index.source_summary();
        assert_eq!(summary.len(), 2);
        // BTreeMap keeps sources sorted by name
        assert_eq!(summary[0].0, "diem_chuan.pdf");
        assert_eq!(summary[0].2, 2);
        assert_eq!(summary[1].1, Category::Tuition);
    }

    #[tokio::test]
    async fn test_search_caps_results_and_applies_threshold() {
        let mut index = test_index();
        index
            .add(
                vec![
                    "Học phí ngành Luật là 24 triệu đồng mỗi năm.".to_string(),
                    "Học phí ngành Kinh tế là 22 triệu đồng mỗi năm.".to_string(),
                    "Học phí ngành Công nghệ thông tin là 26 triệu đồng.".to_string(),
                ],
                "hoc_phi_hoc_bong.pdf",
            )
            .await
            .unwrap();

        let hits = index.search("học phí bao nhiêu", 2, 0.001).await.unwrap();
        assert!(hits.len() <= 2);
        assert!(!hits.is_empty());
        for hit in &hits {
            assert!(!hit.is_sentinel());
            assert!(hit.score >= 0.001);
        }
    }

    #[tokio::test]
    async fn test_search_is_idempotent() {
        let mut index = test_index();
        index
            .add(
                vec![
                    "Học phí khoảng 24 triệu đồng mỗi năm.".to_string(),
                    "Học bổng dành cho sinh viên giỏi.".to_string(),
                ],
                "hoc_phi_hoc_bong.pdf",
            )
            .await
            .unwrap();

        let first = index.search("học phí mỗi năm", 5, 0.001).await.unwrap();
        let second = index.search("học phí mỗi năm", 5, 0.001).await.unwrap();
        let flatten = |hits: &[SearchHit]| -> Vec<(String, String)> {
            hits.iter()
                .map(|h| (h.text.clone(), h.source_file.clone()))
                .collect()
        };
        assert_eq!(flatten(&first), flatten(&second));
    }

    #[tokio::test]
    async fn test_tuition_query_routes_to_tuition_source() {
        let mut index = test_index();
        index
            .add(
                vec!["Học phí mỗi học kỳ khoảng 12 triệu đồng.".to_string()],
                "hoc_phi_hoc_bong.pdf",
            )
            .await
            .unwrap();
        index
            .add(
                vec!["Thư viện trung tâm phục vụ sinh viên cả tuần.".to_string()],
                "co_so_vat_chat.pdf",
            )
            .await
            .unwrap();

        let hits = index
            .search("học phí một học kỳ bao nhiêu tiền", 1, 0.001)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source_file, "hoc_phi_hoc_bong.pdf");
    }

    #[tokio::test]
    async fn test_no_match_returns_fallback_message() {
        let mut index = test_index();
        index
            .add(
                vec!["Thư viện trung tâm phục vụ sinh viên cả tuần.".to_string()],
                "co_so_vat_chat.pdf",
            )
            .await
            .unwrap();

        // An off-topic query scores nowhere near a strict threshold
        let hits = index
            .search("blockchain validator rewards", 5, 0.5)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].is_sentinel());
        assert_eq!(hits[0].text, NO_MATCH_MESSAGE);
    }

    #[tokio::test]
    async fn test_other_category_sources_stay_reachable() {
        let mut index = test_index();
        index
            .add(
                vec!["Trường Đại học Mở TP.HCM thành lập năm 1990.".to_string()],
                "OU_info.pdf",
            )
            .await
            .unwrap();

        // "other"-tagged chunks sit last in every priority order but must
        // still be reachable
        let hits = index
            .search("trường thành lập năm nào", 3, 0.001)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source_file, "OU_info.pdf");
    }
}
