// Gemini Vision Pro - image analysis studio powered by Google Gemini
// Author: kelexine (https://github.com/kelexine)

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod metrics;
pub mod models;
pub mod render;
pub mod server;
pub mod utils;
pub mod vision;
