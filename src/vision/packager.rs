// Image packaging for analysis requests
// Author: kelexine (https://github.com/kelexine)

use super::models::{ImageFormat, ImagePart, RetainedImage, UploadedImage};
use crate::error::{AppError, Result};
use crate::models::gemini::InlineData;
use base64::Engine;
use tracing::{debug, warn};

/// Largest upload echoed back into the page. Bigger files are analyzed but
/// not previewed, and must be picked again for the next submission.
pub const MAX_RETAINED_BYTES: usize = 5 * 1024 * 1024;

/// Package an upload into the single-element fragment sequence sent to Gemini.
///
/// The declared media type is forwarded verbatim. The bytes are not decoded,
/// resized or size-checked; the picker's extension filter is the only gate.
pub fn package_image(upload: Option<&UploadedImage>) -> Result<Vec<ImagePart>> {
    let upload = upload.ok_or(AppError::MissingImage)?;

    if let Some(detected) = detect_format(&upload.bytes) {
        if ImageFormat::from_mime_type(&upload.media_type) != Some(detected) {
            warn!(
                "Declared media type {} does not match detected {}",
                upload.media_type,
                detected.mime_type()
            );
        }
    }

    debug!(
        "Packaged {} ({} bytes, {})",
        upload.file_name,
        upload.bytes.len(),
        upload.media_type
    );

    Ok(vec![ImagePart {
        mime_type: upload.media_type.clone(),
        data: upload.bytes.clone(),
    }])
}

/// Encode an image fragment as Gemini `inlineData`
pub fn to_inline_data(part: &ImagePart) -> InlineData {
    InlineData {
        mime_type: part.mime_type.clone(),
        data: base64::engine::general_purpose::STANDARD.encode(&part.data),
    }
}

/// Keep an upload on the page for preview and resubmission.
///
/// Only recognised formats up to [`MAX_RETAINED_BYTES`] are retained.
pub fn retain_image(upload: &UploadedImage) -> Option<RetainedImage> {
    let format = upload.format()?;

    if upload.bytes.len() > MAX_RETAINED_BYTES {
        debug!(
            "Not retaining {} ({} bytes, limit {})",
            upload.file_name,
            upload.bytes.len(),
            MAX_RETAINED_BYTES
        );
        return None;
    }

    Some(RetainedImage {
        file_name: upload.file_name.clone(),
        media_type: upload.media_type.clone(),
        format,
        data: base64::engine::general_purpose::STANDARD.encode(&upload.bytes),
    })
}

/// Rebuild an upload from the hidden fields written by [`retain_image`].
pub fn restore_image(file_name: String, media_type: String, data: &str) -> Result<UploadedImage> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| AppError::InvalidRequest(format!("Invalid retained image: {}", e)))?;

    debug!("Restored {} ({} bytes) from the page", file_name, bytes.len());
    Ok(UploadedImage::new(file_name, media_type, bytes))
}

/// Detect format from magic bytes at start of image data
fn detect_format(data: &[u8]) -> Option<ImageFormat> {
    if data.starts_with(b"\xFF\xD8\xFF") {
        Some(ImageFormat::Jpeg)
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(ImageFormat::Png)
    } else {
        None
    }
}
