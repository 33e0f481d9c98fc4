// Configuration file loading tests
// Author: kelexine (https://github.com/kelexine)

use gemini_vision_pro::config::AppConfig;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_overrides_defaults() {
    let file = config_file(
        r#"
[server]
port = 9000
max_upload_mb = 5

[gemini]
model = "gemini-1.5-pro"

[ui]
page_title = "Vision Lab"
"#,
    );

    let config = AppConfig::load_from(Some(file.path())).unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.max_upload_bytes(), 5 * 1024 * 1024);
    assert_eq!(config.gemini.model, "gemini-1.5-pro");
    assert_eq!(config.ui.page_title, "Vision Lab");
}

#[test]
fn test_unset_keys_keep_defaults() {
    let file = config_file("[logging]\nformat = \"json\"\n");

    let config = AppConfig::load_from(Some(file.path())).unwrap();

    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.gemini.api_key_env, "GOOGLE_API_KEY");
    assert_eq!(config.gemini.timeout_seconds, 0);
    assert_eq!(config.performance.connection_pool_size, 10);
    assert!(config.performance.enable_compression);
}

#[test]
fn test_invalid_file_is_an_error() {
    let file = config_file("[server]\nport = \"not a number\"\n");
    assert!(AppConfig::load_from(Some(file.path())).is_err());
}

#[test]
fn test_environment_overrides_file() {
    // No other test reads the page icon
    const VAR: &str = "GEMINI_VISION_UI__PAGE_ICON";
    let file = config_file("[ui]\npage_icon = \"📁\"\npage_title = \"From File\"\n");

    std::env::set_var(VAR, "🛰️");
    let loaded = AppConfig::load_from(Some(file.path()));
    std::env::remove_var(VAR);
    let config = loaded.unwrap();

    assert_eq!(config.ui.page_icon, "🛰️");
    assert_eq!(config.ui.page_title, "From File");
}
