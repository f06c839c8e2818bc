//! Prompt builder for rendering templates with query-specific values.

use std::collections::HashMap;

use advisor_core::{AppError, AppResult};
use handlebars::Handlebars;

use crate::templates::{
    ANALYSIS_TEMPLATE, EXTRACTION_TEMPLATE, GENERAL_TEMPLATE, SYNTHESIS_TEMPLATE,
};

/// Render a Handlebars template with variables.
pub fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // The answers carry HTML markup on purpose; never escape it
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

/// Per-source extraction prompt: one query against one file's context.
pub fn extraction_prompt(query: &str, context: &str) -> AppResult<String> {
    tracing::debug!(context_chars = context.chars().count(), "Building extraction prompt");
    let mut vars = HashMap::new();
    vars.insert("query".to_string(), query.to_string());
    vars.insert("context".to_string(), context.to_string());
    render_template(EXTRACTION_TEMPLATE, &vars)
}

/// Synthesis prompt over the combined top-ranked partial answers.
pub fn synthesis_prompt(query: &str, topic: &str, combined: &str) -> AppResult<String> {
    let mut vars = HashMap::new();
    vars.insert("query".to_string(), query.to_string());
    vars.insert("topic".to_string(), topic.to_string());
    vars.insert("combined".to_string(), combined.to_string());
    render_template(SYNTHESIS_TEMPLATE, &vars)
}

/// General-knowledge fallback prompt.
pub fn general_prompt(query: &str) -> AppResult<String> {
    let mut vars = HashMap::new();
    vars.insert("query".to_string(), query.to_string());
    render_template(GENERAL_TEMPLATE, &vars)
}

/// Query-analysis prompt requesting a JSON reply.
pub fn analysis_prompt(query: &str) -> AppResult<String> {
    let mut vars = HashMap::new();
    vars.insert("query".to_string(), query.to_string());
    render_template(ANALYSIS_TEMPLATE, &vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("query".to_string(), "Học phí bao nhiêu?".to_string());

        let result = render_template("Câu hỏi: {{query}}", &vars);
        assert_eq!(result.unwrap(), "Câu hỏi: Học phí bao nhiêu?");
    }

    #[test]
    fn test_render_template_missing_variable() {
        let vars = HashMap::new();
        let result = render_template("Câu hỏi: {{missing}}", &vars);
        // Handlebars renders missing variables as empty string
        assert!(result.is_ok());
    }

    #[test]
    fn test_extraction_prompt_embeds_query_and_context() {
        let prompt =
            extraction_prompt("Điểm chuẩn ngành CNTT?", "NGUỒN: diem_chuan.pdf").unwrap();
        assert!(prompt.contains("CÂU HỎI: \"Điểm chuẩn ngành CNTT?\""));
        assert!(prompt.contains("NGUỒN: diem_chuan.pdf"));
        assert!(prompt.contains("HƯỚNG DẪN TRÍCH XUẤT"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_synthesis_prompt_embeds_topic() {
        let prompt = synthesis_prompt("Học phí?", "học phí", "Nội dung A\n\n---\n\nNội dung B")
            .unwrap();
        assert!(prompt.contains("CHỦ ĐỀ CHÍNH: học phí"));
        assert!(prompt.contains("Nội dung A"));
        assert!(prompt.contains("ưu tiên nguồn mới nhất (2025 > 2024)"));
    }

    #[test]
    fn test_html_markup_is_not_escaped() {
        let mut vars = HashMap::new();
        vars.insert(
            "combined".to_string(),
            "<strong class=\"text-accent\">24.00</strong>".to_string(),
        );
        vars.insert("query".to_string(), "q".to_string());
        vars.insert("topic".to_string(), "t".to_string());

        let rendered = render_template(SYNTHESIS_TEMPLATE, &vars).unwrap();
        assert!(rendered.contains("<strong class=\"text-accent\">24.00</strong>"));
    }

    #[test]
    fn test_analysis_prompt_requests_json_fields() {
        let prompt = analysis_prompt("Ngành nào hot?").unwrap();
        assert!(prompt.contains("chủ_đề, từ_khóa, file_ưu_tiên"));
        assert!(prompt.contains("Câu hỏi: \"Ngành nào hot?\""));
    }
}
