// Gemini API client
// Author: kelexine (https://github.com/kelexine)

use crate::config::{ApiKey, GeminiConfig};
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::gemini::{Content, GenerateContentRequest, GenerateContentResponse, Part};
use crate::utils::logging::sanitize;
use crate::vision::{to_inline_data, ImagePart};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Client for the Google Gemini `generateContent` API.
///
/// Sends one blocking request per analysis to the pinned model. There is no
/// retry: a failed call is reported straight back to the page.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
    api_key: Option<ApiKey>,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// A missing `api_key` is accepted here; calls fail later with
    /// [`AppError::MissingApiKey`].
    pub fn new(config: &GeminiConfig, api_key: Option<ApiKey>) -> Result<Self> {
        Self::with_pool_size(config, api_key, 10)
    }

    /// Same as [`GeminiClient::new`] with an explicit idle-connection pool size.
    pub fn with_pool_size(
        config: &GeminiConfig,
        api_key: Option<ApiKey>,
        pool_size: usize,
    ) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(pool_size)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls();

        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }

        let http_client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client for {}", config.api_base_url);

        Ok(Self {
            http_client,
            config: config.clone(),
            api_key,
        })
    }

    /// Get the pinned model identifier
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the API base_url
    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    /// Whether an API key was found at startup
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run one image analysis and return the model's text.
    ///
    /// The request is a single user turn holding, in order, the instruction,
    /// the first image fragment and the user's prompt.
    pub async fn analyze(
        &self,
        instruction: &str,
        image: &[ImagePart],
        prompt: &str,
    ) -> Result<String> {
        let image = image.first().ok_or(AppError::MissingImage)?;

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::text(instruction),
                Part::InlineData {
                    inline_data: to_inline_data(image),
                },
                Part::text(prompt),
            ])],
        };

        let response = self.generate_content(request).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Token usage: prompt={:?} candidates={:?} total={:?}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        response.text()
    }

    /// Call Gemini `generateContent` API (blocking).
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::MissingApiKey(self.config.api_key_env.clone()))?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.model
        );
        debug!("Calling generateContent API for model: {}", self.config.model);

        let start = Instant::now();
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key.expose())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                metrics::record_gemini_call(&self.config.model, 0, start.elapsed().as_secs_f64());
                error!("Gemini request failed: {}", sanitize(&e.to_string()));
                AppError::Http(e)
            })?;

        let status = response.status();
        metrics::record_gemini_call(
            &self.config.model,
            status.as_u16(),
            start.elapsed().as_secs_f64(),
        );

        if !status.is_success() {
            let error_text = sanitize(&response.text().await.unwrap_or_default());
            error!(
                "Gemini API error: HTTP {} - Response body: {}",
                status, error_text
            );
            let message = Self::extract_error_message(&error_text).unwrap_or(error_text);
            return Err(match status.as_u16() {
                401 | 403 => AppError::Authentication(message),
                429 => AppError::TooManyRequests(format!("Gemini API quota exceeded: {}", message)),
                503 | 504 => AppError::ServiceUnavailable(format!("Upstream unavailable: {}", message)),
                _ => AppError::GeminiApi(format!("HTTP {}: {}", status, message)),
            });
        }

        let response_text = response.text().await?;

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        let gemini_response: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                error!("Failed to parse Gemini response: {}", e);
                AppError::GeminiApi(format!("Response parsing error: {}", e))
            })?;

        info!(
            "Gemini responded in {:.2}s",
            start.elapsed().as_secs_f64()
        );
        Ok(gemini_response)
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        let error = serde_json::from_str::<ErrorResponse>(response_text).ok()?.error?;
        error.message.or(error.status)
    }
}
