use serde::{Deserialize, Serialize};

/// Image formats the upload surface accepts and the model is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Png,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_mime())
    }
}

impl MediaType {
    pub fn as_mime(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
        }
    }

    /// Parse a declared content type such as `image/png` or `IMAGE/JPEG; q=1`.
    pub fn from_mime(s: &str) -> Option<Self> {
        let essence = s.split(';').next().unwrap_or("").trim().to_lowercase();

        match essence.as_str() {
            "image/jpeg" | "image/jpg" => Some(MediaType::Jpeg),
            "image/png" => Some(MediaType::Png),
            _ => None,
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;

        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            "png" => Some(MediaType::Png),
            _ => None,
        }
    }
}

/// Raw upload as handed over by the web layer, before ingestion.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// An ingested image: declared type plus the complete payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    media_type: MediaType,
    bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(media_type: MediaType, bytes: Vec<u8>) -> Self {
        Self { media_type, bytes }
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// One outbound request to the model. Can only be built from an image
/// that was actually ingested.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    instruction: String,
    image: UploadedImage,
}

impl AnalysisRequest {
    pub fn new(instruction: impl Into<String>, image: UploadedImage) -> Self {
        Self {
            instruction: instruction.into(),
            image,
        }
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn image(&self) -> &UploadedImage {
        &self.image
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NoImage,
    UnsupportedMediaType,
    UploadTooLarge,
    Service,
    Unexpected,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::NoImage => "no_image",
            ErrorKind::UnsupportedMediaType => "unsupported_media_type",
            ErrorKind::UploadTooLarge => "upload_too_large",
            ErrorKind::Service => "service",
            ErrorKind::Unexpected => "unexpected",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResult {
    Success { text: String },
    Failure { error_kind: ErrorKind, message: String },
}

impl AnalysisResult {
    pub fn success(text: impl Into<String>) -> Self {
        AnalysisResult::Success { text: text.into() }
    }

    pub fn failure(error_kind: ErrorKind, message: impl Into<String>) -> Self {
        AnalysisResult::Failure {
            error_kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success { .. })
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            AnalysisResult::Success { .. } => None,
            AnalysisResult::Failure { error_kind, .. } => Some(*error_kind),
        }
    }
}
