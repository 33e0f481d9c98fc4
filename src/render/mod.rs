//! Server-side rendering of the analysis page.
//!
//! The single page is an askama template fed from a [`Page`]. Model output
//! arrives pre-rendered from Markdown; everything else goes through askama's
//! HTML escaping.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod markdown;

use crate::analysis::{Page, Phase};
use crate::config::AppConfig;
use crate::error::Result;
use crate::vision::{ImageFormat, RetainedImage};
use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    title: &'a str,
    icon: &'a str,
    model: &'a str,
    accept: String,
    max_upload_mb: usize,
    prompt: &'a str,
    image: Option<&'a RetainedImage>,
    error: Option<ErrorView<'a>>,
    result: Option<ResultView<'a>>,
}

struct ErrorView<'a> {
    message: &'a str,
    tip: Option<&'static str>,
}

struct ResultView<'a> {
    html: &'a str,
    download_href: String,
    file_name: &'static str,
}

/// Render the full page for `page`.
pub fn render_page(config: &AppConfig, page: &Page) -> Result<String> {
    let (error, result) = match &page.phase {
        Phase::Idle => (None, None),
        Phase::Failed(failure) => (
            Some(ErrorView {
                message: &failure.message,
                tip: failure.tip(),
            }),
            None,
        ),
        Phase::Complete(report) => (
            None,
            Some(ResultView {
                html: &report.html,
                download_href: report.download.data_url(),
                file_name: report.download.file_name,
            }),
        ),
    };

    let template = IndexTemplate {
        title: &config.ui.page_title,
        icon: &config.ui.page_icon,
        model: &config.gemini.model,
        accept: ImageFormat::accept_attribute(),
        max_upload_mb: config.server.max_upload_mb,
        prompt: &page.prompt,
        image: page.image.as_ref(),
        error,
        result,
    };

    Ok(template.render()?)
}
