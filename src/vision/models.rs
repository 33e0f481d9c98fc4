// Vision models and types
// Author: kelexine (https://github.com/kelexine)

use bytes::Bytes;
use phf::phf_map;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// File extensions accepted by the upload picker
static EXTENSIONS: phf::Map<&'static str, ImageFormat> = phf_map! {
    "jpg" => ImageFormat::Jpeg,
    "jpeg" => ImageFormat::Jpeg,
    "png" => ImageFormat::Png,
};

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// Try to detect format from MIME type
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// Match the file extension against the picker allow-list
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        EXTENSIONS.get(ext.to_lowercase().as_str()).copied()
    }

    /// Value for the HTML `accept` attribute of the file picker
    pub fn accept_attribute() -> String {
        let mut exts: Vec<String> = EXTENSIONS.keys().map(|ext| format!(".{}", ext)).collect();
        exts.sort();
        exts.join(",")
    }
}

/// An image received from the upload picker, owned by a single request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    /// Media type as declared by the browser
    pub media_type: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Format implied by the file extension, falling back to the declared type.
    pub fn format(&self) -> Option<ImageFormat> {
        ImageFormat::from_file_name(&self.file_name)
            .or_else(|| ImageFormat::from_mime_type(&self.media_type))
    }
}

/// An upload echoed back into the page, so the next submission can reuse it
/// without picking the file again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetainedImage {
    pub file_name: String,
    /// Media type as originally declared by the browser
    pub media_type: String,
    pub format: ImageFormat,
    /// Base64 of the raw bytes
    pub data: String,
}

impl RetainedImage {
    /// `data:` URL for the preview, always using the canonical MIME type
    pub fn preview_url(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.data)
    }
}

/// Image fragment of an analysis request: declared media type + raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_name() {
        assert_eq!(ImageFormat::from_file_name("photo.JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_file_name("scan.jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_file_name("shot.final.png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_file_name("anim.gif"), None);
        assert_eq!(ImageFormat::from_file_name("noextension"), None);
    }

    #[test]
    fn test_accept_attribute() {
        assert_eq!(ImageFormat::accept_attribute(), ".jpeg,.jpg,.png");
    }

    #[test]
    fn test_format_falls_back_to_media_type() {
        let image = UploadedImage::new("blob", "image/png", vec![0u8; 4]);
        assert_eq!(image.format(), Some(ImageFormat::Png));
    }
}
