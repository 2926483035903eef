//! Assistant Reply Markdown
//!
//! Renders chat replies with pulldown-cmark. Reply text is untrusted:
//! - raw HTML is shown as text, never injected
//! - images become plain links (no remote fetches from the chat log)
//! - `javascript:`/`data:`/`vbscript:` link targets are neutralized

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

const BLOCKED_SCHEMES: &[&str] = &["javascript:", "data:", "vbscript:"];

/// Render one message body to an HTML fragment
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let mut html_output = String::new();
    push_html(&mut html_output, parser.map(sanitize_event));
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id })
        | Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::End(TagEnd::Image) => Event::End(TagEnd::Link),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let lower = url.trim_start().to_ascii_lowercase();
    if BLOCKED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}
