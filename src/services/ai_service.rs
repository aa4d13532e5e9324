use anyhow::Result;

use crate::models::AnalysisRequest;

/// Trait for hosted multimodal models (Gemini, test doubles, ...)
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AIService: Send + Sync {
    /// One round trip: instruction plus image in, the model's text out.
    async fn generate(&self, request: &AnalysisRequest) -> Result<String>;
}
