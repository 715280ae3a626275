use crate::normalizer::BASE64_MARKER;
use crate::types::{AnalyzerError, Result};
use base64::{engine::general_purpose, Engine};
use std::path::Path;
use tracing::debug;

/// Extensions accepted for chart images and the media type each maps to.
pub const ACCEPTED_IMAGE_TYPES: [(&str, &str); 3] = [
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
];

/// Check that `path` looks like a chart image we can submit: a PNG or
/// JPEG no larger than `max_bytes`. Returns the media type.
pub async fn validate_image_file(path: &Path, max_bytes: u64) -> Result<&'static str> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let mime = extension
        .as_deref()
        .and_then(|ext| {
            ACCEPTED_IMAGE_TYPES
                .iter()
                .find(|(accepted, _)| *accepted == ext)
                .map(|(_, mime)| *mime)
        })
        .ok_or_else(|| {
            AnalyzerError::Validation("Please upload a valid image file (PNG, JPG, or JPEG)".to_string())
        })?;

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > max_bytes {
        return Err(AnalyzerError::Validation(format!(
            "Image size should be less than {}MB",
            max_bytes / (1024 * 1024)
        )));
    }

    Ok(mime)
}

/// Read an image file into a data URL, ready for the pipeline.
pub async fn encode_image_file(path: &Path, max_bytes: u64) -> Result<String> {
    let mime = validate_image_file(path, max_bytes).await?;
    let bytes = tokio::fs::read(path).await?;

    debug!("Encoding {} ({} bytes, {})", path.display(), bytes.len(), mime);

    Ok(format!("data:{};{}{}", mime, BASE64_MARKER, general_purpose::STANDARD.encode(bytes)))
}

/// Request body limit that leaves room for a base64-encoded image of
/// `max_image_bytes` plus the JSON around it.
pub fn body_limit(max_image_bytes: u64) -> usize {
    let encoded = max_image_bytes.div_ceil(3) * 4;
    (encoded + 64 * 1024) as usize
}
