// Property tests for form validation and image packaging
// Author: kelexine (https://github.com/kelexine)

use gemini_vision_pro::analysis::AnalysisForm;
use gemini_vision_pro::error::AppError;
use gemini_vision_pro::vision::{package_image, UploadedImage};
use proptest::prelude::*;

fn accepted_upload() -> impl Strategy<Value = UploadedImage> {
    (
        "[a-z0-9_]{1,12}",
        prop::sample::select(vec![
            ("jpg", "image/jpeg"),
            ("jpeg", "image/jpeg"),
            ("png", "image/png"),
            ("PNG", "image/png"),
        ]),
        prop::collection::vec(any::<u8>(), 0..512),
    )
        .prop_map(|(stem, (ext, mime), bytes)| {
            UploadedImage::new(format!("{stem}.{ext}"), mime, bytes)
        })
}

proptest! {
    #[test]
    fn whitespace_prompt_is_always_missing(prompt in "[ \t\r\n]{0,16}", image in accepted_upload()) {
        let form = AnalysisForm { prompt, image: Some(image) };
        prop_assert!(matches!(form.validate(), Err(AppError::MissingPrompt)));
    }

    #[test]
    fn prompt_without_image_is_missing_image(prompt in "[ ]{0,3}[A-Za-z0-9?]{1,40}[ ]{0,3}") {
        let form = AnalysisForm { prompt, image: None };
        prop_assert!(matches!(form.validate(), Err(AppError::MissingImage)));
    }

    #[test]
    fn accepted_uploads_pass_validation(prompt in "[A-Za-z]{1,20}", image in accepted_upload()) {
        let form = AnalysisForm { prompt, image: Some(image) };
        prop_assert!(form.validate().is_ok());
    }

    #[test]
    fn packaging_keeps_bytes_and_declared_type(
        bytes in prop::collection::vec(any::<u8>(), 0..1024),
        mime in prop::sample::select(vec!["image/jpeg", "image/png", "image/x-png", "application/octet-stream"]),
    ) {
        let upload = UploadedImage::new("upload.png", mime, bytes.clone());
        let parts = package_image(Some(&upload)).unwrap();

        prop_assert_eq!(parts.len(), 1);
        prop_assert_eq!(parts[0].mime_type.as_str(), mime);
        prop_assert_eq!(parts[0].data.as_ref(), bytes.as_slice());
    }
}
