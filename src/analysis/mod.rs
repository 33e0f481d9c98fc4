//! Image analysis flow behind the "Analyze" button.
//!
//! A submission is validated (prompt first, then image), packaged, and sent
//! to Gemini in a single call. The outcome is captured as a [`Page`] for
//! rendering. Validation failures never reach the model client.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod state;

pub use state::{AnalysisReport, Download, Failure, FailureKind, Page, Phase};

use crate::error::{AppError, Result};
use crate::gemini::GeminiClient;
use crate::metrics;
use crate::vision::{package_image, retain_image, ImageFormat, UploadedImage};
use tracing::{info, warn};

/// Instruction sent ahead of every user prompt
pub const ANALYSIS_INSTRUCTION: &str = "You are an advanced image analysis expert using the Gemini AI system.
Analyze the provided image thoroughly and provide detailed insights
based on the user's query. Include relevant details and maintain
a professional tone in your response.";

/// Inputs collected by the page on one submission.
#[derive(Debug, Clone, Default)]
pub struct AnalysisForm {
    pub prompt: String,
    pub image: Option<UploadedImage>,
}

impl AnalysisForm {
    /// Check the inputs in page order: prompt, then image.
    pub fn validate(&self) -> Result<&UploadedImage> {
        if self.prompt.trim().is_empty() {
            return Err(AppError::MissingPrompt);
        }

        let image = self.image.as_ref().ok_or(AppError::MissingImage)?;

        if ImageFormat::from_file_name(&image.file_name).is_none() {
            return Err(AppError::UnsupportedImage(image.file_name.clone()));
        }

        Ok(image)
    }
}

/// Run one submission end to end and return the page to show.
pub async fn run(client: &GeminiClient, form: AnalysisForm) -> Page {
    let image = form.image.as_ref().and_then(retain_image);

    let phase = match analyze(client, &form).await {
        Ok(text) => {
            metrics::record_analysis("success");
            info!("Analysis complete ({} chars)", text.len());
            Phase::Complete(AnalysisReport::new(text))
        }
        Err(e) => {
            metrics::record_analysis(outcome_label(&e));
            if e.is_validation() {
                info!("Submission rejected: {}", e);
            } else {
                warn!("Analysis failed: {}", e);
            }
            Phase::Failed(Failure::from(&e))
        }
    };

    Page {
        prompt: form.prompt,
        image,
        phase,
    }
}

/// Page for a submission whose form could not be read in full.
pub fn reject(err: &AppError) -> Page {
    metrics::record_analysis(outcome_label(err));
    warn!("Submission rejected: {}", err);

    Page {
        phase: Phase::Failed(Failure::from(err)),
        ..Page::idle()
    }
}

async fn analyze(client: &GeminiClient, form: &AnalysisForm) -> Result<String> {
    let image = form.validate()?;
    let image_parts = package_image(Some(image))?;

    client
        .analyze(ANALYSIS_INSTRUCTION, &image_parts, &form.prompt)
        .await
}

fn outcome_label(err: &AppError) -> &'static str {
    match err {
        AppError::MissingPrompt => "missing_prompt",
        AppError::MissingImage => "missing_image",
        AppError::UnsupportedImage(_) => "unsupported_image",
        AppError::UploadTooLarge(_) => "upload_too_large",
        _ => "remote_error",
    }
}
