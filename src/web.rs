use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::handlers::AnalysisHandler;
use crate::models::{AnalysisResult, ErrorKind, UploadedFile};

/// Multipart field carrying the photo.
pub const IMAGE_FIELD: &str = "image";

pub struct AppState {
    pub analysis_handler: Arc<AnalysisHandler>,
    pub max_upload_bytes: usize,
}

pub fn create_router(
    analysis_handler: Arc<AnalysisHandler>,
    static_dir: &str,
    max_upload_bytes: usize,
) -> Router {
    let state = Arc::new(AppState {
        analysis_handler,
        max_upload_bytes,
    });

    Router::new()
        .route("/", get(index_page))
        .route("/api/analyze", post(analyze_handler))
        .route("/health", get(health_check))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn index_page() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Json<AnalysisResult>) {
    let upload = match multipart {
        Ok(multipart) => read_upload(multipart)
            .await
            .map_err(|e| upload_failure(e, state.max_upload_bytes)),
        Err(rejection) => {
            log::error!("❌ Rejected upload request: {}", rejection.body_text());
            Err(AnalysisResult::failure(
                ErrorKind::Unexpected,
                format!("An unexpected error occurred: {}", rejection.body_text()),
            ))
        }
    };

    let result = match upload {
        Ok(upload) => state.analysis_handler.run_analysis(upload).await,
        Err(failure) => failure,
    };

    if result.is_success() {
        log::info!("✅ Food analysis done");
    } else if let Some(kind) = result.error_kind() {
        log::warn!("⚠️ Food analysis finished with {} error", kind);
    }

    (status_for(&result), Json(result))
}

/// Pull the first `image` part out of the form, ignoring anything else.
async fn read_upload(mut multipart: Multipart) -> Result<Option<UploadedFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        log::debug!(
            "📦 Received upload {:?} ({:?}, {} bytes)",
            file_name,
            content_type,
            bytes.len()
        );

        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

/// The body limit surfaces as a multipart error with status 413.
fn upload_failure(err: MultipartError, max_upload_bytes: usize) -> AnalysisResult {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        log::warn!("⚠️ Upload exceeds {} bytes", max_upload_bytes);
        return AnalysisResult::failure(
            ErrorKind::UploadTooLarge,
            format!("Image too large. Max size is {} bytes", max_upload_bytes),
        );
    }

    log::error!("❌ Failed to read upload: {}", err.body_text());
    AnalysisResult::failure(
        ErrorKind::Unexpected,
        format!("An unexpected error occurred: {}", err.body_text()),
    )
}

fn status_for(result: &AnalysisResult) -> StatusCode {
    match result.error_kind() {
        None => StatusCode::OK,
        Some(ErrorKind::NoImage) => StatusCode::BAD_REQUEST,
        Some(ErrorKind::UnsupportedMediaType) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Some(ErrorKind::UploadTooLarge) => StatusCode::PAYLOAD_TOO_LARGE,
        Some(ErrorKind::Service) => StatusCode::BAD_GATEWAY,
        Some(ErrorKind::Unexpected) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn health_check() -> &'static str {
    "OK"
}
