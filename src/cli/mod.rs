// CLI module for Gemini Vision Pro
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// Gemini Vision Pro - image analysis studio powered by Google Gemini
#[derive(Parser, Debug)]
#[command(name = "gemini-vision-pro", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.gemini-vision-pro/config.toml)
    #[arg(short, long, env = "GEMINI_VISION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind, overriding the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overriding the config file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Open the page in the default browser once the server is up
    #[arg(long)]
    pub open: bool,
}

impl Args {
    /// Apply flag overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["gemini-vision-pro", "--host", "0.0.0.0", "-p", "9000", "--open"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(args.open);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::parse_from(["gemini-vision-pro"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.port, 8501);
        assert!(!args.open);
    }
}
