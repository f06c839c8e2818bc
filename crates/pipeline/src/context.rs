//! Context preparation for extraction tasks.
//!
//! PDF-extracted Vietnamese text arrives with words glued together and
//! erratic spacing. [`ContextNormalizer`] repairs the known artifacts,
//! restores sentence boundaries, tags the section headings the synthesis
//! step cares about, and collapses the result onto a single line.

use advisor_core::{AppError, AppResult};
use regex::Regex;

/// Upper bound on a task context, in characters.
pub const MAX_CONTEXT_CHARS: usize = 28_000;

/// Appended when a context is cut at [`MAX_CONTEXT_CHARS`].
pub const TRUNCATION_MARKER: &str = "\n\n...(truncated for length)...";

/// Concatenation artifacts seen in the university's PDF exports, applied in
/// order. Bare tokens such as "THPT" and the numeric codes get a trailing
/// space; the later whitespace collapse removes any doubling.
const GLUE_FIXES: &[(&str, &str)] = &[
    ("THÔNGTINTUYỂNSINH", "THÔNG TIN TUYỂN SINH"),
    ("ĐẠIHỌCCHÍNHQUY", "ĐẠI HỌC CHÍNH QUY"),
    ("TrườngĐại", "Trường Đại"),
    ("họcMở", "học Mở"),
    ("ThànhphốHồ", "Thành phố Hồ"),
    ("ChíMinh", "Chí Minh"),
    ("dựkiến", "dự kiến"),
    ("phươnghướng", "phương hướng"),
    ("tuyểnsinh", "tuyển sinh"),
    ("đạihọc", "đại học"),
    ("chínhquy", "chính quy"),
    ("năm2025", "năm 2025"),
    ("cácnội", "các nội"),
    ("dungchính", "dung chính"),
    ("nhưsau", "như sau"),
    ("Chỉtiêu", "Chỉ tiêu"),
    ("ngànhđào", "ngành đào"),
    ("tạochuẩn", "tạo chuẩn"),
    ("phươngthức", "phương thức"),
    ("tốtnghiệp", "tốt nghiệp"),
    ("xéttrúng", "xét trúng"),
    ("họcbạ", "học bạ"),
    ("THPT", "THPT "),
    ("BGD", "BGD "),
    ("ĐT", "ĐT "),
    ("CăncứThông", "Căn cứ Thông"),
    ("CăncứĐề", "Căn cứ Đề"),
    ("tínchỉ", "tín chỉ"),
    ("ngàytháng", "ngày tháng"),
    ("kếtquả", "kết quả"),
    ("thờiđiểm", "thời điểm"),
    ("giáodục", "giáo dục"),
    ("ĐàoTạo", "Đào Tạo"),
    ("KếHoạch", "Kế Hoạch"),
    ("VănBằng", "Văn Bằng"),
    ("cógiá", "có giá"),
    ("trịtới", "trị tới"),
    ("mônxét", "môn xét"),
    ("5500", "5500 "),
    ("34", "34 "),
    ("17", "17 "),
];

/// Headings worth calling out so answers can reference the section they
/// came from.
const SECTION_MARKERS: &[&str] = &[
    "THÔNG TIN TUYỂN SINH",
    "Chỉ tiêu",
    "Phương thức",
    "Điều kiện",
    "Hồ sơ",
    "Thời gian",
];

/// Cleans raw chunk text into a prompt-ready context block.
#[derive(Debug)]
pub struct ContextNormalizer {
    /// Numbered heading fused to the word after it, e.g. "1.Điều kiện".
    heading_re: Regex,
    /// Sentence boundary that lost its period, e.g. "ngành Sinh viên".
    sentence_re: Regex,
    whitespace_re: Regex,
}

impl ContextNormalizer {
    pub fn new() -> AppResult<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| AppError::Task(format!("invalid context pattern {pattern:?}: {e}")))
        };
        Ok(Self {
            heading_re: compile(
                r"(\d+\.)([A-ZĐÁÀẢÃẠÂẤẦẨẪẬĂẮẰẲẴẶÉÈẺẼẸÊẾỀỂỄỆÍÌỈĨỊÓÒỎÕỌÔỐỒỔỖỘƠỚỜỞỠỢÚÙỦŨỤƯỨỪỬỮỰÝỲỶỸỴ])",
            )?,
            sentence_re: compile(r"([^.!?\s])\s+([A-Z])")?,
            whitespace_re: compile(r"\s+")?,
        })
    }

    /// Repair glued words, missing sentence periods, and section headings,
    /// then collapse all whitespace to single spaces.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let mut text = raw.to_string();
        for (broken, fixed) in GLUE_FIXES {
            text = text.replace(broken, fixed);
        }

        let text = self.heading_re.replace_all(&text, "\n\n$1 $2");
        let mut text = self.sentence_re.replace_all(&text, "$1. $2").into_owned();

        for section in SECTION_MARKERS {
            let tagged = format!("\n\n### {} ###\n", section.to_uppercase());
            text = text.replace(section, &tagged);
        }

        self.whitespace_re.replace_all(&text, " ").trim().to_string()
    }

    /// Join chunk texts, normalize, and cap the result at
    /// [`MAX_CONTEXT_CHARS`] characters.
    pub fn build_task_context(&self, chunks: &[String]) -> String {
        let combined = chunks.join("\n\n---\n\n");
        let processed = self.normalize(&combined);
        if processed.chars().count() > MAX_CONTEXT_CHARS {
            let mut truncated: String = processed.chars().take(MAX_CONTEXT_CHARS).collect();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        } else {
            processed
        }
    }
}
