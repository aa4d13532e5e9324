use std::sync::Arc;

use super::ingestion::{ingest, IngestError};
use crate::models::{AnalysisResult, ErrorKind, UploadedFile};
use crate::prompts::INPUT_PROMPT;
use crate::services::{AIService, AnalysisClient};

/// Runs one "Analyze this Food" action. Holds no per-request state.
pub struct AnalysisHandler {
    client: AnalysisClient,
}

impl AnalysisHandler {
    pub fn new(ai: Arc<dyn AIService>) -> Self {
        Self {
            client: AnalysisClient::new(ai),
        }
    }

    pub async fn run_analysis(&self, upload: Option<UploadedFile>) -> AnalysisResult {
        let image = match ingest(upload) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("⚠️ Analysis rejected before the model call: {}", e);
                let kind = match e {
                    IngestError::NoImage => ErrorKind::NoImage,
                    IngestError::UnsupportedMediaType(_) => ErrorKind::UnsupportedMediaType,
                };
                return AnalysisResult::failure(kind, e.to_string());
            }
        };

        log::info!("🍽️ Analyzing {} image ({} bytes)", image.media_type(), image.bytes().len());

        self.client.analyze(INPUT_PROMPT, image).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ai_service::MockAIService;

    fn jpeg_upload(bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            file_name: Some("plate.jpg".to_string()),
            content_type: Some("image/jpeg".to_string()),
            bytes: bytes.to_vec(),
        }
    }

    fn handler_returning(text: &'static str, times: usize) -> AnalysisHandler {
        let mut ai = MockAIService::new();
        ai.expect_generate()
            .withf(|req| req.instruction() == INPUT_PROMPT)
            .times(times)
            .returning(move |_| Ok(text.to_string()));
        AnalysisHandler::new(Arc::new(ai))
    }

    #[tokio::test]
    async fn test_no_image_never_calls_model() {
        let mut ai = MockAIService::new();
        ai.expect_generate().times(0);
        let handler = AnalysisHandler::new(Arc::new(ai));

        let result = handler.run_analysis(None).await;

        assert_eq!(
            result,
            AnalysisResult::failure(ErrorKind::NoImage, "No image uploaded")
        );
    }

    #[tokio::test]
    async fn test_unsupported_type_never_calls_model() {
        let mut ai = MockAIService::new();
        ai.expect_generate().times(0);
        let handler = AnalysisHandler::new(Arc::new(ai));

        let upload = UploadedFile {
            file_name: Some("burger.webp".to_string()),
            content_type: Some("image/webp".to_string()),
            bytes: vec![1, 2, 3],
        };
        let result = handler.run_analysis(Some(upload)).await;

        assert_eq!(result.error_kind(), Some(ErrorKind::UnsupportedMediaType));
    }

    #[tokio::test]
    async fn test_chicken_and_rice_returned_verbatim() {
        let reply = "Meal Name: Chicken and Rice\n1. Chicken - 250 kcal\n2. Rice - 200 kcal\n----\nTotal estimated calories: 450";
        let handler = handler_returning(reply, 1);

        let result = handler.run_analysis(Some(jpeg_upload(b"rice and chicken"))).await;

        assert_eq!(result, AnalysisResult::success(reply));
    }

    #[tokio::test]
    async fn test_no_food_is_a_success() {
        let handler = handler_returning("No food items detected in the image.", 1);

        let result = handler.run_analysis(Some(jpeg_upload(b"laptop"))).await;

        assert!(result.is_success());
        assert_eq!(result, AnalysisResult::success("No food items detected in the image."));
    }

    #[tokio::test]
    async fn test_timeout_becomes_service_error() {
        let mut ai = MockAIService::new();
        ai.expect_generate()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("request timed out after 60 s")));
        let handler = AnalysisHandler::new(Arc::new(ai));

        let result = handler.run_analysis(Some(jpeg_upload(b"soup"))).await;

        match result {
            AnalysisResult::Failure { error_kind, message } => {
                assert_eq!(error_kind, ErrorKind::Service);
                assert!(message.contains("timed out after 60 s"));
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let handler = handler_returning("Meal Name: Pancakes", 2);

        let first = handler.run_analysis(Some(jpeg_upload(b"pancakes"))).await;
        let second = handler.run_analysis(Some(jpeg_upload(b"pancakes"))).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_image_reaches_model_unchanged() {
        let mut ai = MockAIService::new();
        ai.expect_generate()
            .withf(|req| req.image().bytes() == b"\x89PNG raw")
            .times(1)
            .returning(|_| Ok("ok".to_string()));
        let handler = AnalysisHandler::new(Arc::new(ai));

        let upload = UploadedFile {
            file_name: Some("salad.png".to_string()),
            content_type: Some("image/png".to_string()),
            bytes: b"\x89PNG raw".to_vec(),
        };

        assert!(handler.run_analysis(Some(upload)).await.is_success());
    }
}
