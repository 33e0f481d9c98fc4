// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::analysis::{self, AnalysisForm, Page};
use crate::error::{AppError, Result};
use crate::metrics::gather_metrics;
use crate::render::render_page;
use crate::vision::{restore_image, ImageFormat, UploadedImage};
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// GET / - the page in its idle state
pub async fn index_handler(State(state): State<AppState>) -> Result<Html<String>> {
    Ok(Html(render_page(&state.config, &Page::idle())?))
}

/// POST /analyze - the trigger action
///
/// Validation and remote failures are rendered as banners on a normal page.
/// An oversized upload gets the same page with a 413 status; any other
/// malformed form body is answered with an error status.
pub async fn analyze_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response> {
    let form = match read_form(multipart, state.config.server.max_upload_mb).await {
        Ok(form) => form,
        Err(e @ AppError::UploadTooLarge(_)) => {
            let page = analysis::reject(&e);
            let html = render_page(&state.config, &page)?;
            return Ok((StatusCode::PAYLOAD_TOO_LARGE, Html(html)).into_response());
        }
        Err(e) => return Err(e),
    };

    info!(
        "Received analysis request: prompt_chars={}, image={}",
        form.prompt.chars().count(),
        form.image
            .as_ref()
            .map(|i| format!("{} ({} bytes, {})", i.file_name, i.bytes.len(), i.media_type))
            .unwrap_or_else(|| "none".to_string())
    );

    let page = analysis::run(&state.gemini_client, form).await;
    Ok(Html(render_page(&state.config, &page)?).into_response())
}

/// Collect the `prompt` and `image` fields of the upload form.
///
/// When no new file was picked, the image kept on the page by the previous
/// submission (`retained_*` fields) is used instead.
async fn read_form(mut multipart: Multipart, limit_mb: usize) -> Result<AnalysisForm> {
    let mut form = AnalysisForm::default();
    let mut retained_name = String::new();
    let mut retained_type = String::new();
    let mut retained_data = String::new();

    let malformed = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::UploadTooLarge(limit_mb)
        } else {
            AppError::InvalidRequest(format!("Malformed form data: {}", e.body_text()))
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("prompt") => {
                form.prompt = field.text().await.map_err(malformed)?;
            }
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let declared = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(malformed)?;

                // Browsers send an empty, nameless part when no file was picked
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }

                let media_type = declared.unwrap_or_else(|| {
                    ImageFormat::from_file_name(&file_name)
                        .map(|f| f.mime_type().to_string())
                        .unwrap_or_else(|| "application/octet-stream".to_string())
                });
                form.image = Some(UploadedImage::new(file_name, media_type, bytes));
            }
            Some("retained_name") => retained_name = field.text().await.map_err(malformed)?,
            Some("retained_type") => retained_type = field.text().await.map_err(malformed)?,
            Some("retained_data") => retained_data = field.text().await.map_err(malformed)?,
            other => debug!("Ignoring form field {:?}", other),
        }
    }

    if form.image.is_none() && !retained_data.is_empty() {
        form.image = Some(restore_image(retained_name, retained_type, &retained_data)?);
    }

    Ok(form)
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Check API key
    let key_check = if state.gemini_client.has_api_key() {
        HealthCheck {
            status: "ok".to_string(),
            message: format!("API key loaded from {}", state.config.gemini.api_key_env),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "error".to_string(),
            message: format!("{} is not set", state.config.gemini.api_key_env),
        }
    };
    checks.insert("api_key".to_string(), key_check);

    // Check model configuration
    let model_check = HealthCheck {
        status: "ok".to_string(),
        message: format!("Model: {}", state.gemini_client.model()),
    };
    checks.insert("model".to_string(), model_check);

    let config_check = HealthCheck {
        status: "ok".to_string(),
        message: format!("API base: {}", state.gemini_client.base_url()),
    };
    checks.insert("configuration".to_string(), config_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /metrics - Prometheus text exposition
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
}
