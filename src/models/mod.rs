//! Data models for the upstream Google Gemini API.

// Author: kelexine (https://github.com/kelexine)

pub mod gemini;

pub use gemini::{Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part};
