//! Chunk, category, and search-hit types.

use serde::{Deserialize, Serialize};

/// Sentinel text returned when the index holds no chunks at all.
pub const EMPTY_INDEX_MESSAGE: &str =
    "No knowledge base available. Please ingest documents first.";

/// Sentinel text returned when nothing clears the similarity threshold.
pub const NO_MATCH_MESSAGE: &str =
    "Tôi không tìm thấy thông tin cụ thể về câu hỏi của bạn trong cơ sở dữ liệu của tôi.";

/// Coarse topic bucket derived from a document's file name.
///
/// The bucket steers search order: a tuition question scans Tuition-tagged
/// chunks before anything else. Derivation happens once at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ScoreThreshold,
    Tuition,
    Program,
    Facilities,
    Admissions,
    Other,
}

impl Category {
    /// Derive the category from a source file name.
    ///
    /// Checks run in a fixed order; the first matching rule wins. File names
    /// follow the upstream corpus convention (diem_chuan.pdf,
    /// hoc_phi_hoc_bong.pdf, thong_tin_nganh_hoc.pdf, ...).
    pub fn from_source_file(source_file: &str) -> Self {
        let name = source_file.to_lowercase();

        if name.contains("diem") || name.contains("chuan") {
            Category::ScoreThreshold
        } else if name.contains("hoc_phi") || name.contains("bong") {
            Category::Tuition
        } else if name.contains("nganh") || name.contains("khoa") {
            Category::Program
        } else if name.contains("co_so") || name.contains("vat_chat") {
            Category::Facilities
        } else if name.contains("tuyen_sinh") || name.contains("tuyen") {
            Category::Admissions
        } else {
            Category::Other
        }
    }

    /// Stable tag used in the chunk store and stats output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ScoreThreshold => "score_threshold",
            Category::Tuition => "tuition",
            Category::Program => "program",
            Category::Facilities => "facilities",
            Category::Admissions => "admissions",
            Category::Other => "other",
        }
    }

    /// Parse a stored tag back into a category.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "score_threshold" => Some(Category::ScoreThreshold),
            "tuition" => Some(Category::Tuition),
            "program" => Some(Category::Program),
            "facilities" => Some(Category::Facilities),
            "admissions" => Some(Category::Admissions),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    /// Scan order used when the query gives no category signal. Ends in
    /// Other so untagged material is always reachable.
    pub fn default_priority() -> [Category; 6] {
        [
            Category::Admissions,
            Category::Program,
            Category::ScoreThreshold,
            Category::Tuition,
            Category::Facilities,
            Category::Other,
        ]
    }
}

/// One indexed passage of source text.
///
/// Immutable once indexed; `id` is the position in the index's chunk list
/// and doubles as the embedding row index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: usize,
    pub text: String,
    pub source_file: String,
    pub category: Category,
}

/// One search result: passage text, its origin, and the similarity score.
///
/// Sentinel hits carry an empty `source_file`; downstream stages treat them
/// as "nothing found", never as usable context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub text: String,
    pub source_file: String,
    pub score: f32,
}

impl SearchHit {
    /// Build a sentinel hit carrying a fallback message.
    pub fn sentinel(message: &str) -> Self {
        Self {
            text: message.to_string(),
            source_file: String::new(),
            score: 0.0,
        }
    }

    /// Whether this hit is a fallback signal rather than a real passage.
    pub fn is_sentinel(&self) -> bool {
        self.source_file.is_empty()
    }
}
