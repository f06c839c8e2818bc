//! Best-effort query analysis.
//!
//! One generation call classifies the query (main topic, keywords, preferred
//! source files) so task creation can put the most promising file first.
//! Every failure path degrades to a default analysis; analysis never blocks
//! the pipeline.

use std::sync::LazyLock;

use advisor_llm::{GenerationClient, GenerationParams, GenerationRequest};
use advisor_prompt::analysis_prompt;
use regex::Regex;

/// Fallback source-file order when the analysis gives no usable signal.
/// Newest admissions material first.
pub const DEFAULT_FILE_PRIORITY: &[&str] = &[
    "thong_tin_tuyen_sinh_2025.pdf",
    "thong_tin_tuyen_sinh_2024.pdf",
    "diem_chuan.pdf",
    "hoc_phi_hoc_bong.pdf",
    "thong_tin_nganh_hoc.pdf",
    "co_so_vat_chat.pdf",
];

static JSON_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").ok());
static TOPIC_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)chủ[\s_]đề[^:]*:\s*([^\n,\.]+)").ok());
static KEYWORDS_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)từ[\s_]khóa[^:]*:\s*([^\n\.]+)").ok());
static FILES_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)file[\s_]ưu[\s_]tiên[^:]*:\s*([^\n\.]+)").ok());

/// What the query is about, as far as one cheap generation call can tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnalysis {
    pub topic: String,
    pub keywords: Vec<String>,
    /// Raw file recommendation from the analysis reply. Matched as a
    /// substring against known file names, never trusted as a path.
    pub preferred_file_hint: String,
}

impl QueryAnalysis {
    /// Analysis used when the call or the parse failed outright.
    pub fn unknown() -> Self {
        Self {
            topic: "không xác định".to_string(),
            keywords: Vec::new(),
            preferred_file_hint: String::new(),
        }
    }

    /// Parse an analysis reply.
    ///
    /// Prefers an embedded JSON object; when the reply is prose, falls back
    /// to extracting the labelled fields line by line.
    pub fn parse(analysis_text: &str) -> Self {
        if let Some(found) = JSON_RE.as_ref().and_then(|re| re.find(analysis_text)) {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(found.as_str()) {
                return Self::from_value(&value);
            }
            tracing::warn!("Analysis reply contained malformed JSON, extracting fields instead");
        }

        let capture_field = |re: &Option<Regex>| -> Option<String> {
            re.as_ref()
                .and_then(|re| re.captures(analysis_text))
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
        };

        Self {
            topic: capture_field(&TOPIC_RE).unwrap_or_else(|| "unknown".to_string()),
            keywords: capture_field(&KEYWORDS_RE)
                .map(|raw| split_keywords(&raw))
                .unwrap_or_default(),
            preferred_file_hint: capture_field(&FILES_RE).unwrap_or_default(),
        }
    }

    fn from_value(value: &serde_json::Value) -> Self {
        let topic = value
            .get("chủ_đề")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .trim()
            .to_string();

        let keywords = match value.get("từ_khóa") {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Some(serde_json::Value::String(raw)) => split_keywords(raw),
            _ => Vec::new(),
        };

        let preferred_file_hint = match value.get("file_ưu_tiên") {
            Some(serde_json::Value::String(raw)) => raw.trim().to_string(),
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        };

        Self {
            topic,
            keywords,
            preferred_file_hint,
        }
    }
}

fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Run the analysis call. Failures degrade to [`QueryAnalysis::unknown`].
pub async fn analyze_query(client: &dyn GenerationClient, model: &str, query: &str) -> QueryAnalysis {
    let prompt = match analysis_prompt(query) {
        Ok(prompt) => prompt,
        Err(e) => {
            tracing::warn!(error = %e, "Could not render the analysis prompt");
            return QueryAnalysis::unknown();
        }
    };

    let request = GenerationRequest::new(prompt, model).with_params(GenerationParams::ANALYSIS);
    match client.generate(&request).await {
        Ok(response) if !response.content.is_empty() => QueryAnalysis::parse(&response.content),
        Ok(_) => {
            tracing::debug!("Analysis reply was empty");
            QueryAnalysis::unknown()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Query analysis failed");
            QueryAnalysis::unknown()
        }
    }
}

/// Order candidate source files by the analyzed topic.
///
/// Topic keywords route to a short, focused file list; anything unrecognized
/// falls back to the file hint and then to [`DEFAULT_FILE_PRIORITY`].
pub fn file_priorities(analysis: &QueryAnalysis) -> Vec<String> {
    let topic = analysis.topic.to_lowercase();
    let topic_has = |terms: &[&str]| terms.iter().any(|t| topic.contains(t));

    let files: Vec<&str> = if topic_has(&["điểm"]) {
        vec![
            "diem_chuan.pdf",
            "thong_tin_tuyen_sinh_2025.pdf",
            "thong_tin_tuyen_sinh_2024.pdf",
        ]
    } else if topic_has(&["học phí", "phí", "học bổng"]) {
        vec!["hoc_phi_hoc_bong.pdf", "thong_tin_tuyen_sinh_2025.pdf"]
    } else if topic_has(&["ngành", "khoa", "chuyên ngành", "đào tạo"]) {
        vec![
            "thong_tin_nganh_hoc.pdf",
            "thong_tin_tuyen_sinh_2025.pdf",
            "thong_tin_tuyen_sinh_2024.pdf",
        ]
    } else if topic_has(&["vị trí", "việc làm", "cơ hội", "nghề nghiệp"]) {
        vec!["thong_tin_nganh_hoc.pdf"]
    } else if topic_has(&["cơ sở", "vật chất", "thư viện"]) {
        vec!["co_so_vat_chat.pdf", "thong_tin_tuyen_sinh_2025.pdf"]
    } else if topic_has(&["tuyển sinh", "tuyển", "chỉ tiêu", "tổ hợp", "trường"]) {
        vec![
            "thong_tin_tuyen_sinh_2025.pdf",
            "thong_tin_tuyen_sinh_2024.pdf",
            "OU_info.pdf",
        ]
    } else {
        let hint = analysis.preferred_file_hint.to_lowercase();
        if hint.is_empty() {
            DEFAULT_FILE_PRIORITY.to_vec()
        } else {
            let mut files: Vec<&str> = DEFAULT_FILE_PRIORITY
                .iter()
                .copied()
                .filter(|f| hint.contains(f))
                .collect();
            for f in DEFAULT_FILE_PRIORITY.iter().copied() {
                if !files.contains(&f) {
                    files.push(f);
                }
            }
            files
        }
    };

    files.into_iter().map(String::from).collect()
}
