//! Vision and image handling for the analysis studio.
//!
//! This module turns a browser upload into the image fragment of a Gemini
//! request. It covers the picker's format allow-list, packaging of the raw
//! bytes with their declared media type, the base64 encodings used for the
//! API payload, and the copy of an upload kept on the page between
//! submissions.
//!
//! # Submodules
//!
//! - `models`: Upload, fragment and format types.
//! - `packager`: Conversion of uploads into request fragments.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod models;
pub mod packager;

pub use models::{ImageFormat, ImagePart, RetainedImage, UploadedImage};
pub use packager::{package_image, restore_image, retain_image, to_inline_data, MAX_RETAINED_BYTES};
