use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::AIService;
use crate::config::Config;
use crate::models::AnalysisRequest;

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Google Gemini `generateContent` client.
pub struct GeminiService {
    api_key: String,
    model: String,
    api_base: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key: config.google_api_key.clone(),
            model: config.gemini_model.clone(),
            api_base: config.gemini_api_base.clone(),
            timeout: config.request_timeout,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    fn describe_transport_error(&self, err: reqwest::Error) -> anyhow::Error {
        if err.is_timeout() {
            anyhow::anyhow!(
                "request timed out after {} s ({})",
                self.timeout.as_secs(),
                err
            )
        } else {
            anyhow::Error::new(err).context("request to Gemini failed")
        }
    }
}

fn build_request(request: &AnalysisRequest) -> GeminiRequest {
    let image = request.image();
    let base64_image = general_purpose::STANDARD.encode(image.bytes());

    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: request.instruction().to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.media_type().as_mime().to_string(),
                        data: base64_image,
                    },
                },
            ],
        }],
    }
}

/// Joins the text parts of the first candidate, the same text a user
/// would see in Google's own SDKs.
fn extract_text(response: GeminiResponse) -> Result<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => anyhow::bail!("Gemini blocked the request: {}", reason),
            None => anyhow::bail!("No response from Gemini"),
        }
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
        anyhow::bail!("Gemini returned no text (finish reason: {})", reason);
    }

    Ok(text)
}

#[async_trait::async_trait]
impl AIService for GeminiService {
    async fn generate(&self, request: &AnalysisRequest) -> Result<String> {
        let image = request.image();
        log::debug!(
            "📸 Preparing Gemini request: {} bytes of {}",
            image.bytes().len(),
            image.media_type()
        );

        let body = build_request(request);

        log::info!("🤖 Sending request to Gemini with model: {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.describe_transport_error(e))?;

        let status = response.status();
        log::debug!("📥 Gemini response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Gemini API error response: {}", error_text);
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| self.describe_transport_error(e))?;
        log::debug!("📄 Raw Gemini response size: {} bytes", response_text.len());

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).context("Failed to parse Gemini response")?;

        let text = extract_text(gemini_response)?;
        log::info!("✅ Received analysis from Gemini ({} chars)", text.len());

        Ok(text)
    }
}
