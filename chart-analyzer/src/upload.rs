use crate::normalizer::normalize_image;
use crate::types::{AnalyzerError, Result};
use base64::{engine::general_purpose, Engine};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Public path prefix under which stored images are served.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Local-disk store for uploaded chart images.
///
/// The analysis pipeline never reads from here; it only gives the client
/// a URL to preview what it uploaded.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decode and write one image, returning its public URL.
    pub async fn store(&self, base64: Option<&str>) -> Result<String> {
        let encoded = match base64 {
            Some(encoded) if !encoded.is_empty() => encoded,
            _ => return Err(AnalyzerError::Validation("No image data provided".to_string())),
        };

        let payload = normalize_image(Some(encoded))?;
        let bytes = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| AnalyzerError::Validation(format!("Invalid base64 image data: {}", e)))?;

        tokio::fs::create_dir_all(&self.dir).await?;

        let filename = format!(
            "image-{}-{}.jpeg",
            Utc::now().timestamp_millis(),
            &Uuid::new_v4().simple().to_string()[..8]
        );
        let filepath = self.dir.join(&filename);

        debug!("Writing {} bytes to {}", bytes.len(), filepath.display());
        tokio::fs::write(&filepath, &bytes).await?;

        let url = format!("{}/{}", UPLOADS_ROUTE, filename);
        info!("File uploaded successfully to: {}", url);
        Ok(url)
    }
}
