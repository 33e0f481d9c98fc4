// Page state shown after each submission
// Author: kelexine (https://github.com/kelexine)

use crate::error::AppError;
use crate::render::markdown;
use crate::utils::logging::sanitize;
use crate::vision::RetainedImage;
use base64::Engine;

/// Fixed name of the downloadable analysis
pub const DOWNLOAD_FILE_NAME: &str = "gemini_analysis.txt";

/// Media type of the downloadable analysis
pub const DOWNLOAD_MIME_TYPE: &str = "text/plain";

/// Shown under every remote-call failure
pub const RETRY_TIP: &str = "Try uploading a different image or refreshing the page";

/// Everything the page needs to render one interaction.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Prompt text to keep in the text area
    pub prompt: String,
    /// Submitted image kept for preview and the next submission
    pub image: Option<RetainedImage>,
    pub phase: Phase,
}

impl Page {
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Observable page states. Validation runs inside the request that moves
/// the page from `Idle` to one of the result states.
#[derive(Debug, Clone, Default)]
pub enum Phase {
    #[default]
    Idle,
    Failed(Failure),
    Complete(AnalysisReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Input problem caught before calling the model
    Validation,
    /// The model call itself failed
    Remote,
}

/// Error banner contents
#[derive(Debug, Clone)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn tip(&self) -> Option<&'static str> {
        match self.kind {
            FailureKind::Validation => None,
            FailureKind::Remote => Some(RETRY_TIP),
        }
    }
}

impl From<&AppError> for Failure {
    fn from(err: &AppError) -> Self {
        if err.is_validation() {
            Self {
                kind: FailureKind::Validation,
                message: err.to_string(),
            }
        } else {
            Self {
                kind: FailureKind::Remote,
                message: format!("An error occurred: {}", sanitize(&err.to_string())),
            }
        }
    }
}

/// Successful analysis: the raw text, its rendering and the download.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub text: String,
    pub html: String,
    pub download: Download,
}

impl AnalysisReport {
    pub fn new(text: String) -> Self {
        Self {
            html: markdown::to_html(&text),
            download: Download::new(text.clone()),
            text,
        }
    }
}

/// Downloadable copy of the result, byte-identical to the model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub content: String,
}

impl Download {
    pub fn new(content: String) -> Self {
        Self {
            file_name: DOWNLOAD_FILE_NAME,
            mime_type: DOWNLOAD_MIME_TYPE,
            content,
        }
    }

    /// Self-contained `data:` URL for the download link
    pub fn data_url(&self) -> String {
        format!(
            "data:{};charset=utf-8;base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(self.content.as_bytes())
        )
    }
}
