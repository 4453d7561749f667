//! Markdown Rendering
//!
//! pulldown-cmark with two tweaks for preview fields:
//! - raw HTML in the source is shown as text
//! - images are emitted with a size-constrained `<img>`

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag};

/// Characters escaped inside an emitted `src` attribute
const SRC_ENCODE_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Render a long-text field to HTML
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Render for inline use (strips the outer <p>)
pub fn render_markdown_inline(text: &str) -> String {
    let html = render_markdown(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

enum State {
    Normal,
    /// Skipping the alt-text events of an image
    InImage { depth: usize },
}

fn transform_events(parser: Parser<'_>) -> Vec<Event<'_>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::Image { dest_url, .. }) => {
                    let src = utf8_percent_encode(&dest_url, SRC_ENCODE_SET).to_string();
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<img src="{}" style="max-width: 100%; max-height: 400px; display: block;" />"#,
                        src
                    ))));
                    state = State::InImage { depth: 0 };
                }
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            },
            State::InImage { ref mut depth } => match event {
                Event::Start(_) => *depth += 1,
                Event::End(_) => {
                    if *depth == 0 {
                        state = State::Normal;
                    } else {
                        *depth -= 1;
                    }
                }
                _ => {}
            },
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render_markdown("**Answer**\n\n1. first\n2. second");
        assert!(html.contains("<strong>Answer</strong>"));
        assert!(html.contains("<ol>"));
        assert!(html.contains("<li>second</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("before <script>alert(1)</script> after");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_image_drops_alt_text() {
        let html = render_markdown("![chart caption](http://x.test/a.png)");
        assert!(html.contains(r#"<img src="http://x.test/a.png""#));
        assert!(!html.contains("chart caption"));
    }

    #[test]
    fn test_inline_strips_paragraph() {
        assert_eq!(render_markdown_inline("*note*"), "<em>note</em>");
        assert!(render_markdown_inline("- a\n- b").starts_with("<ul>"));
    }
}
