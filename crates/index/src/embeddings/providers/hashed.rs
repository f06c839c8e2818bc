//! Hashed lexical embedding provider.

use advisor_core::AppResult;

use crate::embeddings::provider::EmbeddingProvider;

/// Lexical embedding provider for local, offline operation.
///
/// Generates deterministic embeddings from word and character-trigram
/// hashes. Not semantically accurate like neural embedding models, but
/// consistent and content-dependent, which is enough for keyword-heavy
/// admissions queries against a small corpus.
#[derive(Debug)]
pub struct HashedProvider {
    dimensions: usize,
}

/// Function words carrying no topical signal, dropped before hashing.
/// Vietnamese first, then the handful of English words that show up in
/// mixed-language queries.
const STOP_WORDS: &[&str] = &[
    "và", "của", "là", "cho", "trong", "về", "từ", "với", "đến", "tại", "một", "các", "những",
    "này", "đó", "nên", "khi", "thì", "được", "bằng", "có", "đã", "sẽ", "còn", "vẫn", "the",
    "is", "a", "an", "of", "in", "and", "or", "to", "for",
];

impl HashedProvider {
    /// Create a new hashed provider with specified dimensions.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Generate a hash-based embedding for text.
    fn generate_embedding(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0; self.dimensions];

        let lower = text.to_lowercase();

        // Single letters and stop words carry no signal. Vietnamese words
        // are short, so the length floor counts characters, not bytes.
        let words: Vec<&str> = lower
            .split_whitespace()
            .filter(|w| !STOP_WORDS.contains(w) && w.chars().count() > 1)
            .collect();

        let mut word_freq = std::collections::HashMap::new();
        for word in &words {
            *word_freq.entry(*word).or_insert(0u32) += 1;
        }

        for (word, freq) in word_freq.iter() {
            // Character trigrams spread each word over several dimensions,
            // which keeps near-identical spellings close together
            let chars: Vec<char> = word.chars().collect();
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                let trigram_hash = trigram
                    .bytes()
                    .fold(0u64, |acc, b| acc.wrapping_mul(37).wrapping_add(b as u64));

                let dim_idx = (trigram_hash as usize) % self.dimensions;
                embedding[dim_idx] += (*freq as f32).sqrt();
            }

            // Whole-word hash anchors exact matches
            let word_hash = word
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            let base_dim = (word_hash as usize) % self.dimensions;
            embedding[base_dim] += *freq as f32;
        }

        // Normalize to unit vector
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HashedProvider {
    fn provider_name(&self) -> &str {
        "hashed"
    }

    fn model_name(&self) -> &str {
        "hashed-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| self.generate_embedding(text))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hashed_provider_dimensions() {
        let provider = HashedProvider::new(384);
        assert_eq!(provider.dimensions(), 384);
        assert_eq!(provider.provider_name(), "hashed");
        assert_eq!(provider.model_name(), "hashed-v1");
    }

    #[tokio::test]
    async fn test_embed_single_is_unit_vector() {
        let provider = HashedProvider::new(384);
        let embedding = provider.embed("học phí ngành công nghệ thông tin").await.unwrap();

        assert_eq!(embedding.len(), 384);
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_embed_batch() {
        let provider = HashedProvider::new(384);
        let texts = vec![
            "điểm chuẩn năm 2024".to_string(),
            "học phí học bổng".to_string(),
            "cơ sở vật chất".to_string(),
        ];

        let embeddings = provider.embed_batch(&texts).await.unwrap();

        assert_eq!(embeddings.len(), 3);
        for embedding in &embeddings {
            assert_eq!(embedding.len(), 384);
            let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 0.001);
        }
    }

    #[tokio::test]
    async fn test_deterministic() {
        let provider = HashedProvider::new(384);
        let text = "chỉ tiêu tuyển sinh năm 2025";

        let embedding1 = provider.embed(text).await.unwrap();
        let embedding2 = provider.embed(text).await.unwrap();

        assert_eq!(embedding1, embedding2);
    }

    #[tokio::test]
    async fn test_different_texts_differ() {
        let provider = HashedProvider::new(384);

        let embedding1 = provider.embed("điểm chuẩn ngành luật").await.unwrap();
        let embedding2 = provider.embed("học phí ngành kế toán").await.unwrap();

        assert_ne!(embedding1, embedding2);
    }

    #[tokio::test]
    async fn test_related_texts_score_higher_than_unrelated() {
        let provider = HashedProvider::new(384);

        let query = provider.embed("học phí mỗi học kỳ").await.unwrap();
        let related = provider
            .embed("học phí một học kỳ là 12 triệu đồng")
            .await
            .unwrap();
        let unrelated = provider
            .embed("thư viện mở cửa đến 21 giờ")
            .await
            .unwrap();

        let dot = |a: &[f32], b: &[f32]| -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() };
        assert!(dot(&query, &related) > dot(&query, &unrelated));
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let provider = HashedProvider::new(384);
        let embedding = provider.embed("").await.unwrap();

        assert_eq!(embedding.len(), 384);
        assert!(embedding.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn test_stop_words_only_is_zero_vector() {
        let provider = HashedProvider::new(384);
        let embedding = provider.embed("và của là cho").await.unwrap();

        assert!(embedding.iter().all(|&x| x == 0.0));
    }
}
