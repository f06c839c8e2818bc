//! End-to-end scenarios across classifier, index, scheduler, and synthesis.
//!
//! Each test scripts the generation client and checks which tiers ran, in
//! what order, and what the caller finally sees.

use std::sync::Arc;

use advisor_core::config::PipelineConfig;
use advisor_index::{create_provider, DocumentIndex, EmbeddingConfig};

use crate::pipeline::Pipeline;
use crate::test_support::MockGenerationClient;

fn config(search_threshold: f32) -> PipelineConfig {
    PipelineConfig {
        workers: 3,
        search_k: 5,
        search_threshold,
        embedding_provider: "hashed".to_string(),
        embedding_dimensions: 384,
    }
}

async fn index_with(entries: &[(&str, &str)]) -> DocumentIndex {
    let provider = create_provider(&EmbeddingConfig::default()).unwrap();
    let mut index = DocumentIndex::new(provider);
    for (text, source_file) in entries {
        index
            .add(vec![text.to_string()], source_file)
            .await
            .unwrap();
    }
    index
}

#[tokio::test]
async fn test_analyzed_topic_reorders_extraction_before_search_order() {
    let client = Arc::new(MockGenerationClient::new());
    client.queue_ok(r#"{"chủ_đề": "điểm chuẩn", "từ_khóa": ["điểm chuẩn"], "file_ưu_tiên": ""}"#);
    client.queue_ok("Điểm chuẩn ngành Luật năm 2024 là 24.25 điểm.");
    client.queue_ok("Học phí ngành Luật là 20 triệu đồng mỗi năm.");
    client.queue_ok("Điểm chuẩn ngành Luật năm 2024 là 24.25 điểm, học phí 20 triệu đồng.");
    let pipeline = Pipeline::new(client.clone(), "gemini-2.0-flash", &config(0.0)).unwrap();

    let index = index_with(&[
        (
            "Học phí ngành Luật năm 2025 là 20 triệu đồng mỗi năm học.",
            "hoc_phi_hoc_bong.pdf",
        ),
        (
            "Điểm chuẩn ngành Luật năm 2024 là 24.25 điểm.",
            "diem_chuan.pdf",
        ),
    ])
    .await;

    let answer = pipeline
        .answer_query("học phí ngành luật bao nhiêu", &index)
        .await;

    // The tuition file matches the query category, so search returns it
    // first. The analyzed topic still promotes the score-threshold file to
    // the front of the task list.
    let requests = client.requests();
    assert_eq!(requests.len(), 4);
    assert!(requests[1].prompt.contains("24.25"));
    assert!(requests[2].prompt.contains("20 triệu"));
    assert_eq!(
        answer,
        "Điểm chuẩn ngành Luật năm 2024 là 24.25 điểm, học phí 20 triệu đồng."
    );
}

#[tokio::test]
async fn test_unhelpful_synthesis_is_replaced_by_general_knowledge() {
    let client = Arc::new(MockGenerationClient::new());
    client.queue_ok(r#"{"chủ_đề": "học bổng", "từ_khóa": ["học bổng"], "file_ưu_tiên": ""}"#);
    client.queue_ok("Trường có học bổng 50% học phí cho sinh viên giỏi.");
    client.queue_ok("Tôi không tìm thấy thông tin về học bổng toàn phần trong tài liệu.");
    client.queue_ok(
        "Các trường đại học thường xét học bổng toàn phần theo thành tích học tập và hoạt động ngoại khóa.",
    );
    let pipeline = Pipeline::new(client.clone(), "gemini-2.0-flash", &config(0.0)).unwrap();

    let index = index_with(&[(
        "Trường cấp học bổng 50% học phí cho sinh viên có điểm trung bình trên 8.5.",
        "hoc_phi_hoc_bong.pdf",
    )])
    .await;

    let answer = pipeline
        .answer_query("trường có học bổng toàn phần không", &index)
        .await;

    // The extractions ranked fine, but the synthesized reply admits it found
    // nothing, so the general tier takes over with its disclaimers.
    assert_eq!(client.call_count(), 4);
    assert!(answer.contains("thành tích học tập"));
    assert!(answer.contains("<h4>Thông tin chung</h4>"));
    assert!(answer.contains("Lưu ý"));
}

#[tokio::test]
async fn test_technical_query_survives_general_tier_failure() {
    let client = Arc::new(MockGenerationClient::new());
    client.queue_err("general tier down");
    client.queue_ok(r#"{"chủ_đề": "ngành học", "từ_khóa": ["lập trình"], "file_ưu_tiên": ""}"#);
    client.queue_ok("Ngành Công nghệ thông tin đào tạo lập trình web từ năm thứ hai.");
    client.queue_ok("Ngành Công nghệ thông tin của trường đào tạo lập trình web từ năm thứ hai.");
    let pipeline = Pipeline::new(client.clone(), "gemini-2.0-flash", &config(0.0)).unwrap();

    let index = index_with(&[(
        "Ngành Công nghệ thông tin đào tạo lập trình web và di động.",
        "thong_tin_nganh_hoc.pdf",
    )])
    .await;

    let answer = pipeline
        .answer_query("cho hỏi học lập trình web ở đâu trong trường", &index)
        .await;

    // The technical-query shortcut failed, so the document flow answered
    // instead and no general-knowledge disclaimer was attached.
    assert_eq!(client.call_count(), 4);
    assert_eq!(
        answer,
        "Ngành Công nghệ thông tin của trường đào tạo lập trình web từ năm thứ hai."
    );
    assert!(!answer.contains("Lưu ý"));
}

#[tokio::test]
async fn test_query_matching_nothing_falls_back_to_general_knowledge() {
    let client = Arc::new(MockGenerationClient::new());
    client.queue_err("analysis down");
    client.queue_ok(
        "Trường Đại học Mở TP.HCM là trường đại học công lập tại Thành phố Hồ Chí Minh.",
    );
    let pipeline = Pipeline::new(client.clone(), "gemini-2.0-flash", &config(0.5)).unwrap();

    let index = index_with(&[(
        "Học phí ngành Luật năm 2025 là 20 triệu đồng mỗi năm học.",
        "hoc_phi_hoc_bong.pdf",
    )])
    .await;

    let answer = pipeline.answer_query("abcxyz qwerty asdfgh", &index).await;

    // Nothing clears the similarity floor, so no extraction tasks run; the
    // general tier supplies the answer with its provenance note.
    assert_eq!(client.call_count(), 2);
    assert!(answer.contains("công lập"));
    assert!(answer.contains("Lưu ý"));
}

#[tokio::test]
async fn test_tuition_amount_is_cited_from_its_source_file() {
    let client = Arc::new(MockGenerationClient::new());
    client.queue_ok(r#"{"chủ_đề": "học phí", "từ_khóa": ["học phí"], "file_ưu_tiên": ""}"#);
    client.queue_ok("Học phí mỗi học kỳ là 5,000,000 VND.");
    client.queue_err("synthesis down");
    let pipeline = Pipeline::new(client.clone(), "gemini-2.0-flash", &config(0.0)).unwrap();

    let index = index_with(&[(
        "Học phí ngành Công nghệ thông tin là 5,000,000 VND/semester áp dụng từ 2025.",
        "hoc_phi_2025.txt",
    )])
    .await;

    let answer = pipeline
        .answer_query("học phí học kỳ này bao nhiêu", &index)
        .await;

    // The tuition chunk reaches the worker prompt, and with synthesis down
    // the best extraction comes back carrying its source citation.
    let requests = client.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[1].prompt.contains("5,000,000"));
    assert!(answer.contains("5,000,000 VND"));
    assert!(answer.contains("Thông tin được tìm thấy trong: hoc_phi_2025.txt"));
}

#[tokio::test]
async fn test_three_source_fan_out_failing_entirely_uses_general_tier() {
    let client = Arc::new(MockGenerationClient::new());
    client.queue_ok(r#"{"chủ_đề": "tuyển sinh", "từ_khóa": ["tuyển sinh"], "file_ưu_tiên": ""}"#);
    client.queue_err("worker down");
    client.queue_err("worker down");
    client.queue_err("worker down");
    client.queue_ok(
        "Các trường đại học thường công bố phương án tuyển sinh vào đầu năm, thí sinh nên theo dõi trang thông tin chính thức.",
    );
    let pipeline = Pipeline::new(client.clone(), "gemini-2.0-flash", &config(0.0)).unwrap();

    let index = index_with(&[
        (
            "Phương án tuyển sinh năm 2025 gồm năm phương thức xét tuyển.",
            "tuyen_sinh_2025.txt",
        ),
        (
            "Điểm chuẩn các ngành năm 2024 dao động từ 16 đến 24 điểm.",
            "diem_chuan_2024.txt",
        ),
        (
            "Trường đào tạo 34 ngành bậc đại học chính quy.",
            "nganh_dao_tao.txt",
        ),
    ])
    .await;

    let answer = pipeline
        .answer_query("trường tuyển sinh năm nay thế nào", &index)
        .await;

    // All three extractions failed, nothing ranked, synthesis was skipped;
    // the general tier supplies a disclaimed answer.
    assert_eq!(client.call_count(), 5);
    assert!(answer.contains("phương án tuyển sinh"));
    assert!(answer.contains("<h4>Thông tin chung</h4>"));
    assert!(answer.contains("Lưu ý"));
}
