// Markdown rendering for model output
// Author: kelexine (https://github.com/kelexine)

use pulldown_cmark::{html, Event, Options, Parser};

/// Render model output as HTML.
///
/// Raw HTML embedded in the text is shown as literal text, never injected.
pub fn to_html(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
