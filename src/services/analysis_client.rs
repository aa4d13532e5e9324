use std::sync::Arc;

use super::AIService;
use crate::models::{AnalysisRequest, AnalysisResult, ErrorKind, UploadedImage};

/// Boundary around the model call: every outcome comes back as an
/// `AnalysisResult`, failures included.
pub struct AnalysisClient {
    ai: Arc<dyn AIService>,
}

impl AnalysisClient {
    pub fn new(ai: Arc<dyn AIService>) -> Self {
        Self { ai }
    }

    pub async fn analyze(&self, instruction: &str, image: UploadedImage) -> AnalysisResult {
        let request = AnalysisRequest::new(instruction, image);

        match self.ai.generate(&request).await {
            Ok(text) => AnalysisResult::success(text),
            Err(e) => {
                log::error!("❌ Food analysis failed: {:#}", e);
                AnalysisResult::failure(
                    ErrorKind::Service,
                    format!("Error communicating with the Gemini API: {:#}", e),
                )
            }
        }
    }
}
