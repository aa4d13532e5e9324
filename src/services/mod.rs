pub mod ai_service;
pub mod analysis_client;
pub mod gemini; // Google Gemini multimodal API

pub use ai_service::AIService;
pub use analysis_client::AnalysisClient;
pub use gemini::GeminiService;
