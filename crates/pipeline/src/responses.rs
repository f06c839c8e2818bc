//! Canned HTML replies for conversational queries.
//!
//! Three variants per intent; the classifier picks one at random so repeated
//! greetings do not read identically. The HTML classes match the web client's
//! stylesheet.

use crate::classifier::Intent;

const GREETING: [&str; 3] = [
    r#"<h4 class="text-gradient">Xin chào!</h4><p>Chào bạn! Mình là trợ lý tư vấn tuyển sinh của trường Đại học Mở Thành phố Hồ Chí Minh. Mình có thể giúp gì cho bạn?</p>"#,
    r#"<h4 class="text-gradient">Chào bạn!</h4><p>Rất vui được gặp bạn. Mình là trợ lý tư vấn tuyển sinh của trường Đại học Mở TP.HCM. Bạn cần tư vấn về vấn đề gì?</p>"#,
    r#"<h4 class="text-gradient">Xin chào!</h4><p>Chào mừng bạn đến với hệ thống tư vấn tuyển sinh trường Đại học Mở TP.HCM! Bạn cần tìm hiểu thông tin gì?</p>"#,
];

const FAREWELL: [&str; 3] = [
    r#"<h4 class="text-gradient">Tạm biệt!</h4><p>Cảm ơn bạn đã trò chuyện. Hẹn gặp lại bạn lần sau!</p>"#,
    r#"<h4 class="text-gradient">Tạm biệt!</h4><p>Rất vui được hỗ trợ bạn. Chúc bạn một ngày tốt lành!</p>"#,
    r#"<h4 class="text-gradient">Chào tạm biệt!</h4><p>Nếu còn thắc mắc gì, bạn có thể quay lại chat với mình bất cứ lúc nào nhé!</p>"#,
];

const HEALTH_INQUIRY: [&str; 3] = [
    r#"<p>Cảm ơn bạn đã hỏi thăm! Mình là trợ lý ảo nên luôn trong trạng thái sẵn sàng phục vụ bạn. Bạn cần hỗ trợ thông tin gì về trường Đại học Mở TP.HCM?</p>"#,
    r#"<p>Mình là chatbot nên luôn khỏe mạnh và sẵn sàng hỗ trợ bạn 24/7. Bạn cần tìm hiểu thông tin gì về tuyển sinh?</p>"#,
    r#"<p>Mình hoạt động tốt, cảm ơn bạn đã quan tâm! Mình có thể giúp bạn tìm hiểu thông tin tuyển sinh của trường Đại học Mở không?</p>"#,
];

const THANKS: [&str; 3] = [
    r#"<p>Không có gì đâu bạn! Mình rất vui khi được giúp bạn. Bạn còn cần hỗ trợ gì nữa không?</p>"#,
    r#"<p>Rất vui khi thông tin mình cung cấp có ích cho bạn! Nếu còn thắc mắc gì, đừng ngại hỏi mình nhé.</p>"#,
    r#"<p>Không có chi! Đó là nhiệm vụ của mình. Bạn còn câu hỏi nào về tuyển sinh nữa không?</p>"#,
];

const BOT_IDENTITY: [&str; 3] = [
    r#"<h4 class="text-gradient">Về tôi</h4><p>Mình là Admission ChatGenie - trợ lý tư vấn tuyển sinh ảo của trường Đại học Mở Thành phố Hồ Chí Minh. Mình được tạo ra để hỗ trợ thông tin tuyển sinh và giải đáp thắc mắc cho các bạn thí sinh.</p>"#,
    r#"<h4 class="text-gradient">Trợ lý tư vấn tuyển sinh</h4><p>Mình là chatbot tư vấn tuyển sinh của trường Đại học Mở TP.HCM, được tạo ra để giúp các bạn tìm hiểu thông tin về ngành học, điểm chuẩn, học phí và các thông tin tuyển sinh khác.</p>"#,
    r#"<h4 class="text-gradient">Giới thiệu</h4><p>Xin chào! Mình là trợ lý ảo chuyên cung cấp thông tin tuyển sinh của trường Đại học Mở Thành phố Hồ Chí Minh. Bạn có thể hỏi mình bất kỳ thông tin gì liên quan đến tuyển sinh của nhà trường.</p>"#,
];

const SYSTEM_INFO: [&str; 3] = [
    r#"<h4 class="text-gradient">Về hệ thống</h4><p>Mình là một chatbot thông minh được phát triển dựa trên công nghệ Generative AI kết hợp với Retrieval-Augmented Generation (RAG). Mình hoạt động bằng cách tìm kiếm thông tin liên quan từ cơ sở dữ liệu tài liệu PDF của trường và sử dụng AI để tổng hợp câu trả lời chính xác.</p>"#,
    r#"<h4 class="text-gradient">Cách mình hoạt động</h4><p>Mình là chatbot sử dụng công nghệ xử lý ngôn ngữ tự nhiên và tìm kiếm thông tin theo ngữ cảnh. Khi bạn đặt câu hỏi, mình sẽ tìm kiếm thông tin từ cơ sở dữ liệu tài liệu của trường Đại học Mở và đưa ra câu trả lời phù hợp nhất.</p>"#,
    r#"<h4 class="text-gradient">Công nghệ sử dụng</h4><p>Mình được xây dựng dựa trên các công nghệ tiên tiến như Vector Database, LLM (Large Language Model), và kỹ thuật xử lý ngôn ngữ tự nhiên. Mình liên tục học hỏi để cải thiện khả năng trả lời của mình.</p>"#,
];

const USER_EMOTION: [&str; 3] = [
    r#"<p>Mình hiểu cảm xúc của bạn. Quá trình tìm hiểu thông tin tuyển sinh đôi khi khá căng thẳng. Mình ở đây để giúp bạn tìm hiểu thông tin một cách dễ dàng hơn. Bạn cần hỗ trợ gì?</p>"#,
    r#"<p>Cảm xúc của bạn rất quan trọng. Nếu bạn cảm thấy lo lắng về kỳ thi hoặc việc chọn trường, mình có thể giúp cung cấp thông tin chính xác để bạn yên tâm hơn. Bạn muốn biết gì về trường Đại học Mở?</p>"#,
    r#"<p>Mình ở đây để giúp bạn. Hãy cho mình biết bạn cần tìm hiểu thông tin gì, mình sẽ cố gắng giúp bạn giải đáp mọi thắc mắc về tuyển sinh.</p>"#,
];

const HELP_REQUEST: [&str; 3] = [
    r#"<h4 class="text-gradient">Mình có thể giúp gì?</h4><p>Mình có thể giúp bạn tìm hiểu về các thông tin tuyển sinh như: điểm chuẩn các năm, chỉ tiêu tuyển sinh, học phí, chương trình đào tạo, các ngành học, học bổng, cơ sở vật chất, và nhiều thông tin khác. Bạn muốn biết về vấn đề nào?</p>"#,
    r#"<h4 class="text-gradient">Sẵn sàng hỗ trợ!</h4><p>Mình có thể giúp bạn giải đáp các thắc mắc về tuyển sinh của trường Đại học Mở TP.HCM. Bạn hãy đặt câu hỏi cụ thể về điều bạn muốn biết nhé!</p>"#,
    r#"<h4 class="text-gradient">Tôi có thể giúp gì?</h4><p>Mình sẵn sàng hỗ trợ bạn tìm hiểu thông tin tuyển sinh. Bạn đang quan tâm đến ngành nào hoặc có thắc mắc gì về quá trình tuyển sinh?</p>"#,
];

const BOT_CAPABILITIES: [&str; 3] = [
    r#"<h4 class="text-gradient">Khả năng của tôi</h4><p>Mình có thể giúp bạn:</p><ul><li>Tra cứu điểm chuẩn các ngành</li><li>Cung cấp thông tin về học phí</li><li>Tư vấn về các ngành đào tạo</li><li>Giải đáp thắc mắc về chương trình học</li><li>Thông tin về học bổng</li><li>Hướng dẫn thủ tục xét tuyển</li><li>Thông tin về cơ sở vật chất</li></ul>"#,
    r#"<h4 class="text-gradient">Tôi có thể làm gì?</h4><p>Mình là trợ lý tư vấn tuyển sinh, có thể giúp bạn:</p><ul><li>Tìm hiểu về các phương thức xét tuyển</li><li>Cung cấp thông tin chi tiết về các ngành học</li><li>Tra cứu điểm chuẩn qua các năm</li><li>Thông tin về học phí và học bổng</li><li>Giải đáp các thắc mắc về quy trình nhập học</li><li>Cung cấp thông tin về cơ sở vật chất của trường</li></ul>"#,
    r#"<h4 class="text-gradient">Chức năng của tôi</h4><p>Mình được tạo ra để giúp bạn tìm hiểu mọi thông tin liên quan đến tuyển sinh của trường Đại học Mở TP.HCM như điểm chuẩn, ngành học, học phí, học bổng và các thông tin khác. Bạn cứ hỏi, mình sẽ cố gắng trả lời!</p>"#,
];

const UNIVERSITY_GENERAL: [&str; 3] = [
    r#"<h4 class="text-gradient">Trường Đại học Mở TP.HCM</h4><p>Trường Đại học Mở Thành phố Hồ Chí Minh là một trường đại học công lập trực thuộc Bộ Giáo dục và Đào tạo. Trường có nhiều ngành học đa dạng, với các phương thức đào tạo linh hoạt, môi trường học tập năng động. Bạn muốn biết thông tin cụ thể nào về trường?</p>"#,
    r#"<h4 class="text-gradient">Giới thiệu về Trường</h4><p>Trường Đại học Mở TP.HCM được thành lập từ năm 1990 và là một trong những trường đại học hàng đầu tại TP.HCM. Trường có nhiều ngành đào tạo chất lượng và cơ sở vật chất hiện đại. Bạn cần tư vấn cụ thể về vấn đề nào?</p>"#,
    r#"<h4 class="text-gradient">ĐH Mở TP.HCM</h4><p>Trường Đại học Mở Thành phố Hồ Chí Minh có nhiều chương trình đào tạo chất lượng, đội ngũ giảng viên giỏi và cơ sở vật chất hiện đại. Trường cung cấp môi trường học tập năng động và cơ hội việc làm rộng mở sau khi tốt nghiệp. Bạn muốn tìm hiểu thêm về điểm chuẩn, ngành học hay học phí?</p>"#,
];

const JOKES: [&str; 3] = [
    r#"<h4 class="text-gradient">Chuyện vui về trường đại học</h4><p>Một sinh viên gọi về nhà: "Mẹ ơi, con đã tiêu hết tiền học kỳ này rồi!" Mẹ trả lời: "Con đã làm gì với khoản tiền đó vậy? Học kỳ mới mới bắt đầu được 2 tuần!" Sinh viên: "Con biết... Nhưng trường đại học in danh sách sinh viên bị đuổi học sớm quá, và con phải trả phí để không có tên trong đó!" 😂</p>"#,
    r#"<h4 class="text-gradient">Chuyện cười</h4><p>Giáo sư hỏi sinh viên: "Tại sao bạn lại nộp một tờ giấy trắng làm bài kiểm tra?" Sinh viên trả lời: "Thưa thầy, đó là vì em và thầy đều biết câu trả lời, nên em không muốn lặp lại những điều hiển nhiên ạ!" 😁</p>"#,
    r#"<h4 class="text-gradient">Nụ cười tuyển sinh</h4><p>Thí sinh: "Thầy ơi, em muốn học ngành không phải làm nhiều bài tập về nhà, không cần thi cử nhiều, và ra trường có việc làm lương cao ngay. Trường mình có ngành nào như thế không ạ?" Thầy tư vấn tuyển sinh: "Có chứ, đó gọi là... giấc mơ!" 🤣</p>"#,
];

const FUN_FACTS: [&str; 3] = [
    r#"<h4 class="text-gradient">Sự thật thú vị về giáo dục</h4><p>Bạn có biết: Trường đại học đầu tiên trên thế giới là Đại học Al-Qarawiyyin ở Morocco, được thành lập vào năm 859! Còn trường đại học đầu tiên ở Việt Nam là Quốc Tử Giám - tiền thân của Đại học Quốc gia Hà Nội ngày nay, được thành lập từ thời nhà Lý (1076).</p>"#,
    r#"<h4 class="text-gradient">Điều thú vị về Đại học Mở</h4><p>Trường Đại học Mở TP.HCM là một trong những trường đại học đi đầu trong đào tạo từ xa tại Việt Nam. Trường còn có hệ thống học trực tuyến hiện đại giúp sinh viên có thể học mọi lúc, mọi nơi. Đặc biệt, nhiều chương trình đào tạo của trường có sự hợp tác với các trường đại học uy tín trên thế giới.</p>"#,
    r#"<h4 class="text-gradient">Fact thú vị</h4><p>Sinh viên học đại học thường thay đổi ngành học ít nhất 3 lần trước khi tốt nghiệp! Đó là lý do tại sao việc tìm hiểu kỹ về ngành học trước khi đăng ký rất quan trọng. Trường Đại học Mở TP.HCM cung cấp nhiều buổi tư vấn hướng nghiệp giúp các bạn định hướng ngành học phù hợp.</p>"#,
];

const VIETNAMESE_EXPRESSIONS: [&str; 3] = [
    r#"<p>Dạ! Mình đây, bạn cần giúp gì về thông tin tuyển sinh của trường Đại học Mở TP.HCM?</p>"#,
    r#"<p>Mình đang nghe nè! Bạn muốn tìm hiểu thông tin gì về trường Đại học Mở TP.HCM?</p>"#,
    r#"<p>Dạ, mình hiểu rồi ạ! Bạn cần mình giải đáp thông tin gì về tuyển sinh?</p>"#,
];

const OUT_OF_SCOPE: [&str; 3] = [
    r#"<h4 class="text-gradient">Xin lỗi bạn!</h4><p>Mình là trợ lý tư vấn tuyển sinh của trường Đại học Mở TP.HCM, nên mình chỉ có thể trả lời các câu hỏi liên quan đến tuyển sinh, ngành học, điểm chuẩn, học phí và các thông tin về trường thôi. Bạn có thể hỏi mình những thông tin này nhé!</p>"#,
    r#"<h4 class="text-gradient">Thông tin ngoài phạm vi</h4><p>Rất tiếc, câu hỏi của bạn nằm ngoài phạm vi kiến thức của mình. Mình chỉ có thể tư vấn về các vấn đề liên quan đến tuyển sinh của trường Đại học Mở TP.HCM như: điểm chuẩn, ngành học, học phí, quy trình xét tuyển, v.v. Bạn có thể hỏi mình về những chủ đề này không?</p>"#,
    r#"<h4 class="text-gradient">Chủ đề khác</h4><p>Mình là trợ lý chuyên về tuyển sinh của trường Đại học Mở TP.HCM nên không thể trả lời câu hỏi này. Bạn có thể hỏi mình về các chủ đề như: chỉ tiêu tuyển sinh, điểm chuẩn, học phí, chương trình đào tạo, hoặc cơ sở vật chất của trường Đại học Mở TP.HCM.</p>"#,
];

/// The reply pool for an intent.
pub(crate) fn pool_for(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::Greeting => &GREETING,
        Intent::Farewell => &FAREWELL,
        Intent::HealthInquiry => &HEALTH_INQUIRY,
        Intent::Thanks => &THANKS,
        Intent::BotIdentity => &BOT_IDENTITY,
        Intent::SystemInfo => &SYSTEM_INFO,
        Intent::UserEmotion => &USER_EMOTION,
        Intent::HelpRequest => &HELP_REQUEST,
        Intent::BotCapabilities => &BOT_CAPABILITIES,
        Intent::UniversityGeneral => &UNIVERSITY_GENERAL,
        Intent::Jokes => &JOKES,
        Intent::FunFacts => &FUN_FACTS,
        Intent::VietnameseExpressions => &VIETNAMESE_EXPRESSIONS,
        Intent::OutOfScope => &OUT_OF_SCOPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_intent_has_three_variants() {
        for intent in Intent::ALL {
            assert_eq!(pool_for(intent).len(), 3, "pool for {}", intent.as_str());
        }
    }
}
