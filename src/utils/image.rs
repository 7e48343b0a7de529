use std::path::Path;

use base64::{engine::general_purpose::STANDARD as Base64, Engine as _};
use serde::Serialize;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::analysis::ImageSource;

pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_FILE_NAME: &str = "image.jpg";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn rejected(message: &str) -> Self {
        Self {
            valid: false,
            error: Some(message.to_string()),
        }
    }

    pub fn into_result(self) -> AppResult<()> {
        if self.valid {
            return Ok(());
        }
        Err(AppError::validation(
            self.error.unwrap_or_else(|| "Invalid image".to_string()),
        ))
    }
}

/// Checks MIME type and size before anything is uploaded.
pub fn validate_image(mime_type: &str, size_bytes: u64) -> ImageValidation {
    if !mime_type.trim().to_lowercase().starts_with("image/") {
        return ImageValidation::rejected("Please select an image file");
    }

    if size_bytes > MAX_IMAGE_BYTES {
        return ImageValidation::rejected("Image size must be less than 10MB");
    }

    ImageValidation::ok()
}

/// Image bytes ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
}

impl ImagePayload {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Resolves and validates an image source. Files are size-checked from
/// metadata before being read.
pub async fn load_image(source: &ImageSource) -> AppResult<ImagePayload> {
    let payload = match source {
        ImageSource::DataUri(uri) => {
            let (mime_type, bytes) = decode_data_uri(uri)?;
            validate_image(&mime_type, bytes.len() as u64).into_result()?;
            ImagePayload {
                bytes,
                mime_type,
                file_name: DEFAULT_FILE_NAME.to_string(),
            }
        }
        ImageSource::File(path) => {
            let mime_type = mime_from_path(path);
            let metadata = tokio::fs::metadata(path).await.map_err(|err| {
                AppError::validation(format!("Cannot read image {}: {err}", path.display()))
            })?;
            validate_image(mime_type, metadata.len()).into_result()?;
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(DEFAULT_FILE_NAME)
                .to_string();
            ImagePayload {
                bytes,
                mime_type: mime_type.to_string(),
                file_name,
            }
        }
        ImageSource::Bytes {
            bytes,
            mime_type,
            file_name,
        } => {
            validate_image(mime_type, bytes.len() as u64).into_result()?;
            ImagePayload {
                bytes: bytes.clone(),
                mime_type: mime_type.clone(),
                file_name: file_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            }
        }
    };

    debug!(
        target: "app::image",
        mime_type = %payload.mime_type,
        size = payload.size(),
        "image resolved"
    );
    Ok(payload)
}

/// Splits `data:<mime>;base64,<data>` into its MIME type and decoded bytes.
pub fn decode_data_uri(uri: &str) -> AppResult<(String, Vec<u8>)> {
    let rest = uri
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| AppError::validation("Image reference is not a data URI"))?;

    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| AppError::validation("Malformed data URI: missing payload"))?;

    let mut parts = header.split(';');
    let mime_type = parts
        .next()
        .filter(|value| !value.is_empty())
        .unwrap_or("text/plain")
        .to_lowercase();
    if !parts.any(|part| part.eq_ignore_ascii_case("base64")) {
        return Err(AppError::validation(
            "Only base64-encoded data URIs are supported",
        ));
    }

    let bytes = Base64.decode(data.trim()).map_err(|err| {
        AppError::validation_with_details(
            "Malformed data URI: invalid base64 payload",
            serde_json::json!({ "reason": err.to_string() }),
        )
    })?;

    Ok((mime_type, bytes))
}

pub fn mime_from_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn rejects_oversized_png() {
        let result = validate_image("image/png", 15 * MB);
        assert!(!result.valid);
        assert_eq!(
            result.error.as_deref(),
            Some("Image size must be less than 10MB")
        );
    }

    #[test]
    fn accepts_small_jpeg() {
        let result = validate_image("image/jpeg", 2 * MB);
        assert!(result.valid);
        assert!(result.error.is_none());
    }

    #[test]
    fn rejects_non_image_mime() {
        let result = validate_image("application/pdf", 1024);
        assert!(!result.valid);
        assert_eq!(result.error.as_deref(), Some("Please select an image file"));
    }

    #[test]
    fn exactly_ten_megabytes_is_allowed() {
        assert!(validate_image("image/webp", MAX_IMAGE_BYTES).valid);
    }

    #[test]
    fn decodes_base64_data_uri() {
        let (mime, bytes) = decode_data_uri("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn rejects_plain_data_uri() {
        let error = decode_data_uri("data:image/png,raw").unwrap_err();
        assert!(error.is_validation());
    }

    #[test]
    fn guesses_mime_from_extension() {
        assert_eq!(mime_from_path(Path::new("leaf.JPG")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("notes.txt")), "application/octet-stream");
    }
}
