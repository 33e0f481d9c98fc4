//! Configuration data structures for Gemini Vision Pro.
//!
//! This module defines the schema for the application settings: the HTTP
//! server hosting the page, the upstream Gemini API, page branding, logging
//! and connection tuning.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, upload limit).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Page title and icon.
    #[serde(default)]
    pub ui: UiConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Performance and resource management settings.
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8501`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted upload, in megabytes.
    /// Default: `200`
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

/// Settings for the upstream Gemini API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL for the Generative Language API.
    /// Default: `https://generativelanguage.googleapis.com/v1beta`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// The pinned model every analysis is sent to.
    /// Default: `gemini-2.0-flash-exp`
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key.
    /// Default: `GOOGLE_API_KEY`
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds. `0` leaves the HTTP client default in place.
    /// Default: `0`
    #[serde(default)]
    pub timeout_seconds: u64,
}

/// Branding shown in the page header and browser tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Default: `Gemini Vision Pro`
    #[serde(default = "default_page_title")]
    pub page_title: String,

    /// Default: `🔮`
    #[serde(default = "default_page_icon")]
    pub page_icon: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Settings for tuning application performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Maximum number of idle connections to keep per host in the HTTP pool.
    /// Default: `10`
    #[serde(default = "default_pool_size")]
    pub connection_pool_size: usize,

    /// Whether to enable GZIP compression for HTTP responses.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enable_compression: bool,
}

impl ServerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_seconds: 0,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_title: default_page_title(),
            page_icon: default_page_icon(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            connection_pool_size: default_pool_size(),
            enable_compression: true,
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_max_upload_mb() -> usize {
    200
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_page_title() -> String {
    "Gemini Vision Pro".to_string()
}

fn default_page_icon() -> String {
    "🔮".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_pool_size() -> usize {
    10
}
