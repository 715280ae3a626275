use crate::types::{AnalyzerError, Result};

/// Marker that precedes the payload in a data URL.
pub const BASE64_MARKER: &str = "base64,";

/// Media type used when an image is handed back to a model service.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Reduce an uploaded image to its bare base64 payload.
///
/// `data:image/png;base64,AAAA` becomes `AAAA`; input without the marker
/// is returned as-is. Nothing is decoded here.
pub fn normalize_image(image: Option<&str>) -> Result<String> {
    let image = match image {
        Some(image) if !image.is_empty() => image,
        _ => return Err(AnalyzerError::Validation("No image provided".to_string())),
    };

    let payload = match image.find(BASE64_MARKER) {
        Some(start) => &image[start + BASE64_MARKER.len()..],
        None => image,
    };

    if payload.is_empty() {
        return Err(AnalyzerError::Validation("Invalid image format".to_string()));
    }

    Ok(payload.to_string())
}

/// Wrap a bare payload back into a data URL with the fixed jpeg media type.
pub fn to_data_url(payload: &str) -> String {
    format!("data:{};{}{}", DEFAULT_IMAGE_MIME, BASE64_MARKER, payload)
}
