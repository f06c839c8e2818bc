//! Conversational query gate.
//!
//! Greetings, small talk, and clearly off-topic questions get a canned reply
//! instead of a retrieval round trip. Anything that looks like a real
//! information request falls through to the pipeline, even when it opens
//! with a greeting.

use advisor_core::{AppError, AppResult};
use chrono::{Local, Timelike};
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

use crate::responses;

/// Conversational intents with a canned reply pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Farewell,
    HealthInquiry,
    Thanks,
    BotIdentity,
    SystemInfo,
    UserEmotion,
    HelpRequest,
    BotCapabilities,
    UniversityGeneral,
    Jokes,
    FunFacts,
    VietnameseExpressions,
    OutOfScope,
}

impl Intent {
    pub const ALL: [Intent; 14] = [
        Intent::Greeting,
        Intent::Farewell,
        Intent::HealthInquiry,
        Intent::Thanks,
        Intent::BotIdentity,
        Intent::SystemInfo,
        Intent::UserEmotion,
        Intent::HelpRequest,
        Intent::BotCapabilities,
        Intent::UniversityGeneral,
        Intent::Jokes,
        Intent::FunFacts,
        Intent::VietnameseExpressions,
        Intent::OutOfScope,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Farewell => "farewell",
            Intent::HealthInquiry => "health_inquiry",
            Intent::Thanks => "thanks",
            Intent::BotIdentity => "bot_identity",
            Intent::SystemInfo => "system_info",
            Intent::UserEmotion => "user_emotion",
            Intent::HelpRequest => "help_request",
            Intent::BotCapabilities => "bot_capabilities",
            Intent::UniversityGeneral => "university_general",
            Intent::Jokes => "jokes",
            Intent::FunFacts => "fun_facts",
            Intent::VietnameseExpressions => "vietnamese_expressions",
            Intent::OutOfScope => "out_of_scope",
        }
    }
}

/// Queries matching any of these are information requests and must reach the
/// retrieval pipeline, whatever else they look like.
const INFORMATION_SEEKING_PATTERNS: &[&str] = &[
    r"(?i)(thông\s+tin|tư\s+vấn|cho\s+biết|cho\s+hỏi)",
    r"(?i)(điểm\s+chuẩn|học\s+phí|tuyển\s+sinh|xét\s+tuyển|kỳ\s+thi|học\s+bổng)",
    r"(?i)(hiệu\s+trưởng|phó\s+hiệu\s+trưởng|trưởng\s+khoa|giảng\s+viên|thí\s+sinh|sinh\s+viên)",
    r"(?i)(ngành\s|chuyên\s+ngành|ngành\s+học|khoa\s|tốt\s+nghiệp|kiến\s+thức|đào\s+tạo|chương\s+trình|trang\s+bị)",
    r"(?i)(hồ\s+sơ|phương\s+thức|giấy\s+tờ|thủ\s+tục|đăng\s+ký)",
    r"(?i)(mấy\s+điểm|bao\s+nhiêu\s+điểm|số\s+điểm|mức\s+điểm|lệ\s+phí|điểm\s+đầu\s+vào)",
    r"(?i)(mấy\s+tiền|bao\s+nhiêu\s+tiền|chi\s+phí|tốn|đóng)",
    r"(?i)(khi\s+nào|lúc\s+nào|thời\s+hạn|hạn\s+chót|deadline)",
    r"(?i)(được\s+không|có\s+được|có\s+thể|có\s+cần|liệu\s+có|gì\s)",
    r"(?i)(việc\s+làm|cơ\s+hội|tương\s+lai|ra\s+trường|sau\s+khi\s+học)",
];

/// Intent pattern groups, checked in order. `OutOfScope` sits last so a
/// topical intent always wins over an off-topic match.
const INTENT_PATTERNS: &[(Intent, &[&str])] = &[
    (
        Intent::Greeting,
        &[
            r"(?i)(xin\s+chào|chào\s+bạn|hello|hi|hey|xin\s+chào\s+bạn|chào|chao)",
            r"(?i)(buổi\s+sáng|buổi\s+chiều|buổi\s+tối)\s+(tốt\s+lành)",
            r"(?i)(good\s+morning|good\s+afternoon|good\s+evening)",
        ],
    ),
    (
        Intent::Farewell,
        &[
            r"(?i)(tạm\s+biệt|goodbye|bye|see\s+you|gặp\s+lại\s+sau)",
            r"(?i)(hẹn\s+gặp\s+lại|hen\s+gap\s+lai)",
        ],
    ),
    (
        Intent::HealthInquiry,
        &[
            r"(?i)(bạn\s+khỏe\s+không|khỏe\s+không|how\s+are\s+you|khoe\s+khong)",
            r"(?i)(sức\s+khỏe|dạo\s+này)",
            r"(?i)(bạn\s+có\s+khỏe|có\s+khỏe)",
        ],
    ),
    (
        Intent::Thanks,
        &[
            r"(?i)(cảm\s+ơn|cám\s+ơn|thank|thanks|thank\s+you)",
            r"(?i)(cảm\s+ơn\s+nhiều|cảm\s+ơn\s+bạn|cám\s+ơn\s+bạn|cám\s+ơn\s+nhiều)",
        ],
    ),
    (
        Intent::BotIdentity,
        &[
            r"(?i)(bạn\s+là\s+ai|who\s+are\s+you|mày\s+là\s+ai|bạn\s+tên\s+gì|bạn\s+là\s+gì)",
            r"(?i)(bạn\s+làm\s+gì|công\s+việc|nhiệm\s+vụ)",
            r"(?i)(tên\s+bạn\s+là\s+gì|ban\s+ten\s+gi)",
        ],
    ),
    (
        Intent::SystemInfo,
        &[
            r"(?i)(chatbot|hệ\s+thống|trợ\s+lý|assistant|bạn\s+hoạt\s+động|được\s+tạo)",
            r"(?i)(ai\s+tạo\s+ra\s+bạn|ai\s+là\s+người\s+tạo\s+ra\s+bạn)",
            r"(?i)(làm\s+thế\s+nào|how\s+do\s+you|bạn\s+hoạt\s+động\s+như\s+thế\s+nào)",
        ],
    ),
    (
        Intent::UserEmotion,
        &[
            r"(?i)(mình\s+buồn|tôi\s+buồn|tôi\s+vui|mình\s+vui|tôi\s+lo\s+lắng)",
            r"(?i)(mệt\s+mỏi|mệt\s+quá|chán|cảm\s+thấy\s+chán|cảm\s+thấy|stress)",
        ],
    ),
    (
        Intent::HelpRequest,
        &[
            r"(?i)(giúp\s+đỡ|help|giúp\s+mình|giúp\s+tôi|cứu|hãy\s+giúp)",
            r"(?i)(bạn\s+có\s+thể\s+giúp|bạn\s+giúp\s+mình|ban\s+giup\s+minh)",
            r"(?i)(làm\s+thế\s+nào\s+để|làm\s+sao\s+để|how\s+to)",
        ],
    ),
    (
        Intent::BotCapabilities,
        &[
            r"(?i)(bạn\s+có\s+thể\s+làm\s+gì|bạn\s+có\s+thể\s+giúp\s+những\s+gì|what\s+can\s+you\s+do)",
            r"(?i)(chức\s+năng|tính\s+năng|function|feature)",
            r"(?i)(bạn\s+biết\s+những\s+gì|bạn\s+biết\s+gì)",
        ],
    ),
    (
        Intent::UniversityGeneral,
        &[
            r"(?i)(trường|đại\s+học|học\s+trường|university|truong)",
            r"(?i)(trường\s+đại\s+học\s+mở|trường\s+mở|dai\s+hoc\s+mo)",
        ],
    ),
    (
        Intent::Jokes,
        &[
            r"(?i)(kể\s+chuyện\s+cười|kể\s+joke|nói\s+chuyện\s+vui|tell\s+joke|tell\s+a\s+joke)",
            r"(?i)(chuyện\s+vui|truyện\s+cười|cười|vui|funny)",
        ],
    ),
    (
        Intent::FunFacts,
        &[
            r"(?i)(fact|sự\s+thật\s+thú\s+vị|interesting\s+fact|điều\s+thú\s+vị)",
            r"(?i)(có\s+điều\s+gì\s+thú\s+vị|có\s+thông\s+tin\s+gì\s+thú\s+vị)",
        ],
    ),
    (
        Intent::VietnameseExpressions,
        &[
            r"(?i)(ơi\s+$|này$|ê\s+$|này\s+bạn|bạn\s+ơi)",
            r"(?i)(thế\s+nhỉ\?|đúng\s+không\?|phải\s+không\?|thế\s+à\?)",
            r"(?i)(bạn\s+hiểu\s+không|hiểu\s+chưa|hiểu\s+rồi|hiểu\s+không)",
        ],
    ),
    (
        Intent::OutOfScope,
        &[
            r"(?i)(thời\s+tiết|weather|dự\s+báo)",
            r"(?i)(bóng\s+đá|thể\s+thao|sport|lịch\s+thi\s+đấu)",
            r"(?i)(corona|covid|dịch\s+bệnh|vaccine)",
            r"(?i)(chính\s+trị|politics|chính\s+phủ|government)",
            r"(?i)(làm\s+quen|phone|tell\s+me\s+your\s+number|số\s+điện\s+thoại)",
        ],
    ),
];

/// Admissions vocabulary. A query mentioning any of these is never treated
/// as out of scope by the length heuristic.
const EDUCATION_KEYWORDS: &[&str] = &[
    "đại học",
    "trường",
    "cao đẳng",
    "tuyển sinh",
    "ngành",
    "điểm",
    "học phí",
    "xét tuyển",
    "chỉ tiêu",
    "học bổng",
    "sinh viên",
    "đào tạo",
    "cơ sở",
    "vật chất",
    "tín chỉ",
    "khoa",
    "chuyên ngành",
    "trúng tuyển",
    "nhập học",
    "cử nhân",
    "tốt nghiệp",
    "giảng viên",
    "học kỳ",
    "lớp",
    "môn học",
    "bằng cấp",
    "thạc sĩ",
    "tiến sĩ",
    "nghiên cứu",
    "kỳ thi",
    "công nhận",
    "mở",
    "hồ chí minh",
    "university",
    "college",
    "admission",
    "major",
    "score",
    "tuition",
    "scholarship",
    "student",
    "education",
    "faculty",
    "graduate",
    "bachelor",
    "master",
    "phd",
    "academic",
    "semester",
    "course",
];

/// Time-of-day greeting phrase.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if (5..12).contains(&hour) {
        "Chào buổi sáng"
    } else if (12..18).contains(&hour) {
        "Chào buổi chiều"
    } else {
        "Chào buổi tối"
    }
}

fn time_greeting() -> String {
    let greeting = greeting_for_hour(Local::now().hour());
    format!(
        "<p>{greeting}! Mình là trợ lý tư vấn tuyển sinh của trường Đại học Mở TP.HCM. \
         Mình có thể giúp gì cho bạn?</p>"
    )
}

/// Pattern-based classifier for conversational and off-topic queries.
#[derive(Debug)]
pub struct QueryClassifier {
    info_seeking: Vec<Regex>,
    intents: Vec<(Intent, Vec<Regex>)>,
}

impl QueryClassifier {
    pub fn new() -> AppResult<Self> {
        let compile = |pattern: &&str| {
            Regex::new(pattern)
                .map_err(|e| AppError::Other(format!("invalid conversational pattern {pattern:?}: {e}")))
        };

        let info_seeking = INFORMATION_SEEKING_PATTERNS
            .iter()
            .map(compile)
            .collect::<AppResult<Vec<_>>>()?;

        let mut intents = Vec::with_capacity(INTENT_PATTERNS.len());
        for (intent, patterns) in INTENT_PATTERNS {
            let compiled = patterns.iter().map(compile).collect::<AppResult<Vec<_>>>()?;
            intents.push((*intent, compiled));
        }

        Ok(Self {
            info_seeking,
            intents,
        })
    }

    /// Classify a query, or `None` when it should go through retrieval.
    ///
    /// Information-seeking patterns are checked first: a query that asks for
    /// admissions facts is never handled conversationally.
    pub fn detect_intent(&self, query: &str) -> Option<Intent> {
        if query.is_empty() {
            return None;
        }

        if self.info_seeking.iter().any(|re| re.is_match(query)) {
            tracing::debug!("Query asks for information, deferring to retrieval");
            return None;
        }

        for (intent, patterns) in &self.intents {
            if patterns.iter().any(|re| re.is_match(query)) {
                tracing::debug!(intent = intent.as_str(), "Matched conversational intent");
                return Some(*intent);
            }
        }
        None
    }

    /// True when the query either matches a conversational intent or looks
    /// off-topic.
    pub fn is_conversational(&self, query: &str) -> bool {
        self.detect_intent(query).is_some() || self.is_likely_out_of_scope(query)
    }

    /// Length heuristic for queries no pattern caught: a long query with no
    /// admissions vocabulary is probably off-topic. Short queries get the
    /// benefit of the doubt.
    pub fn is_likely_out_of_scope(&self, query: &str) -> bool {
        if query.chars().count() < 5 {
            return false;
        }

        let query_lower = query.to_lowercase();
        if EDUCATION_KEYWORDS.iter().any(|kw| query_lower.contains(kw)) {
            return false;
        }

        query.split_whitespace().count() >= 10
    }

    /// Canned reply for a conversational query, or `None` when the query
    /// needs the retrieval pipeline. Greetings occasionally get a
    /// time-of-day variant.
    pub fn respond<R: Rng + ?Sized>(&self, query: &str, rng: &mut R) -> Option<String> {
        if let Some(intent) = self.detect_intent(query) {
            if intent == Intent::Greeting && rng.gen_bool(0.3) {
                return Some(time_greeting());
            }
            return responses::pool_for(intent).choose(rng).map(|s| s.to_string());
        }

        if self.is_likely_out_of_scope(query) {
            tracing::debug!("Query looks out of scope, sending a scope reminder");
            return responses::pool_for(Intent::OutOfScope)
                .choose(rng)
                .map(|s| s.to_string());
        }
        None
    }
}
