use thiserror::Error;

use crate::models::{MediaType, UploadedFile, UploadedImage};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("No image uploaded")]
    NoImage,
    #[error("Unsupported image type: {0}. Please upload a JPEG or PNG file")]
    UnsupportedMediaType(String),
}

/// Turn an optional upload into an image ready to send.
///
/// A part with no file name and no bytes is what a browser submits when the
/// file input was left empty, so it counts as no upload at all.
pub fn ingest(upload: Option<UploadedFile>) -> Result<UploadedImage, IngestError> {
    let upload = match upload {
        Some(u) if !is_blank(&u) => u,
        _ => return Err(IngestError::NoImage),
    };

    let media_type = resolve_media_type(&upload)?;

    log::debug!(
        "📥 Ingested {} ({} bytes, {})",
        upload.file_name.as_deref().unwrap_or("<unnamed>"),
        upload.bytes.len(),
        media_type
    );

    Ok(UploadedImage::new(media_type, upload.bytes))
}

fn is_blank(upload: &UploadedFile) -> bool {
    upload.bytes.is_empty() && upload.file_name.as_deref().map_or(true, str::is_empty)
}

fn resolve_media_type(upload: &UploadedFile) -> Result<MediaType, IngestError> {
    let declared = upload
        .content_type
        .as_deref()
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && !ct.eq_ignore_ascii_case("application/octet-stream"));

    let resolved = match declared {
        Some(ct) => MediaType::from_mime(ct),
        None => upload.file_name.as_deref().and_then(MediaType::from_file_name),
    };

    resolved.ok_or_else(|| {
        let described = declared
            .or(upload.file_name.as_deref())
            .unwrap_or("unknown")
            .to_string();
        IngestError::UnsupportedMediaType(described)
    })
}
