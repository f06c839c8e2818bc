//! Test doubles shared across the pipeline tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use advisor_core::{AppError, AppResult};
use advisor_llm::{GenerationClient, GenerationRequest, GenerationResponse};

/// Scripted generation client.
///
/// Replies are served in queue order; once the queue runs dry every further
/// call gets the default reply. All requests are recorded for assertions.
pub(crate) struct MockGenerationClient {
    replies: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    default_reply: String,
}

impl MockGenerationClient {
    pub(crate) fn new() -> Self {
        Self::with_default_reply("Không tìm thấy thông tin liên quan.")
    }

    pub(crate) fn with_default_reply(reply: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            default_reply: reply.to_string(),
        }
    }

    pub(crate) fn queue_ok(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(Ok(reply.to_string()));
    }

    pub(crate) fn queue_err(&self, message: &str) {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
    }

    /// Every request seen so far, in call order.
    pub(crate) fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl GenerationClient for MockGenerationClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerationRequest) -> AppResult<GenerationResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(content)) => Ok(GenerationResponse {
                content,
                model: request.model.clone(),
            }),
            Some(Err(message)) => Err(AppError::Generation(message)),
            None => Ok(GenerationResponse {
                content: self.default_reply.clone(),
                model: request.model.clone(),
            }),
        }
    }
}
