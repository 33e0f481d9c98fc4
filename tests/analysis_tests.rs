// Analysis flow tests against a mocked Gemini endpoint
// Author: kelexine (https://github.com/kelexine)

use base64::Engine;
use gemini_vision_pro::analysis::{self, AnalysisForm, FailureKind, Phase, ANALYSIS_INSTRUCTION};
use gemini_vision_pro::config::{ApiKey, GeminiConfig};
use gemini_vision_pro::gemini::GeminiClient;
use gemini_vision_pro::vision::UploadedImage;
use mockito::{Matcher, Server};
use serde_json::json;

const GENERATE_PATH: &str = "/models/gemini-2.0-flash-exp:generateContent";
const JPEG_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00fake-jpeg-body";

fn client_for(server: &Server, api_key: Option<&str>) -> GeminiClient {
    let config = GeminiConfig {
        api_base_url: server.url(),
        ..Default::default()
    };
    GeminiClient::new(&config, api_key.map(ApiKey::new)).unwrap()
}

fn jpeg_form(prompt: &str) -> AnalysisForm {
    AnalysisForm {
        prompt: prompt.to_string(),
        image: Some(UploadedImage::new("apple.jpg", "image/jpeg", JPEG_BYTES.to_vec())),
    }
}

fn text_response(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_success_sends_one_call_with_instruction_image_and_prompt() {
    let mut server = Server::new_async().await;
    let expected_body = json!({
        "contents": [{
            "role": "user",
            "parts": [
                {"text": ANALYSIS_INSTRUCTION},
                {"inlineData": {
                    "mimeType": "image/jpeg",
                    "data": base64::engine::general_purpose::STANDARD.encode(JPEG_BYTES)
                }},
                {"text": "Describe this"}
            ]
        }]
    });
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::Json(expected_body))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(text_response("A red apple on a table."))
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, Some("test-key"));
    let page = analysis::run(&client, jpeg_form("Describe this")).await;

    mock.assert_async().await;
    match page.phase {
        Phase::Complete(report) => {
            assert_eq!(report.text, "A red apple on a table.");
            assert_eq!(report.download.content, "A red apple on a table.");
            assert_eq!(report.download.file_name, "gemini_analysis.txt");
            assert_eq!(report.download.mime_type, "text/plain");
        }
        other => panic!("expected a completed analysis, got {:?}", other),
    }
    assert_eq!(page.prompt, "Describe this");
    assert!(page.image.unwrap().preview_url().starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn test_blank_prompt_makes_no_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, Some("test-key"));
    let page = analysis::run(&client, jpeg_form(" \n\t ")).await;

    mock.assert_async().await;
    match page.phase {
        Phase::Failed(failure) => {
            assert_eq!(failure.kind, FailureKind::Validation);
            assert_eq!(failure.message, "Please enter a query first");
        }
        other => panic!("expected a validation failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_image_makes_no_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, Some("test-key"));
    let form = AnalysisForm {
        prompt: "Describe this".to_string(),
        image: None,
    };
    let page = analysis::run(&client, form).await;

    mock.assert_async().await;
    match page.phase {
        Phase::Failed(failure) => {
            assert_eq!(failure.kind, FailureKind::Validation);
            assert_eq!(failure.message, "Please upload an image to analyze");
        }
        other => panic!("expected a validation failure, got {:?}", other),
    }
    assert!(page.image.is_none());
}

#[tokio::test]
async fn test_remote_error_shows_its_message() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, Some("bad-key"));
    let page = analysis::run(&client, jpeg_form("Describe this")).await;

    mock.assert_async().await;
    match page.phase {
        Phase::Failed(failure) => {
            assert_eq!(failure.kind, FailureKind::Remote);
            assert!(failure.message.starts_with("An error occurred: "));
            assert!(failure.message.contains("API key not valid"));
            assert!(failure.tip().is_some());
        }
        other => panic!("expected a remote failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_quota_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(429)
        .with_body(r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, Some("test-key"));
    let page = analysis::run(&client, jpeg_form("Describe this")).await;

    mock.assert_async().await;
    match page.phase {
        Phase::Failed(failure) => {
            assert!(failure.message.contains("quota exceeded"));
            assert!(failure.message.contains("Resource has been exhausted"));
        }
        other => panic!("expected a remote failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_response_is_a_remote_failure() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body("not json")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, Some("test-key"));
    let page = analysis::run(&client, jpeg_form("Describe this")).await;

    mock.assert_async().await;
    match page.phase {
        Phase::Failed(failure) => {
            assert_eq!(failure.kind, FailureKind::Remote);
            assert!(failure.message.contains("Response parsing error"));
        }
        other => panic!("expected a remote failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_blocked_prompt_is_a_remote_failure() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, Some("test-key"));
    let page = analysis::run(&client, jpeg_form("Describe this")).await;

    mock.assert_async().await;
    match page.phase {
        Phase::Failed(failure) => assert!(failure.message.contains("SAFETY")),
        other => panic!("expected a remote failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_api_key_fails_without_calling() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, None);
    let page = analysis::run(&client, jpeg_form("Describe this")).await;

    mock.assert_async().await;
    match page.phase {
        Phase::Failed(failure) => {
            assert_eq!(failure.kind, FailureKind::Remote);
            assert!(failure.message.contains("GOOGLE_API_KEY"));
        }
        other => panic!("expected a remote failure, got {:?}", other),
    }
}
