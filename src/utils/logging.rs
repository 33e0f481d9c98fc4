//! Structured logging and secret-scrubbing utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats, and provides a helper that keeps
//! Google API keys out of log lines and error banners.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use regex::Regex;
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Lazily initialized regex for Google API keys
static API_KEY_REGEX: OnceLock<Regex> = OnceLock::new();

fn api_key_regex() -> &'static Regex {
    API_KEY_REGEX.get_or_init(|| {
        Regex::new(r"AIza[0-9A-Za-z_\-]{20,}").expect("Invalid regex pattern")
    })
}

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Replaces every Google API key (`AIza...`) in `input` with `[REDACTED_API_KEY]`.
pub fn sanitize(input: &str) -> String {
    api_key_regex()
        .replace_all(input, "[REDACTED_API_KEY]")
        .into_owned()
}
