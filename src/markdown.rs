//! Markdown rendering for task content.
//!
//! `to_html` is the renderer boundary: a pure text→HTML function used by
//! `tt show --html`. The TUI preview walks the same parser's event stream
//! directly (see `tui::render::preview`).

use pulldown_cmark::{Options, Parser, html};

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

/// Parser over `text` with the crate's enabled extensions.
pub fn parser(text: &str) -> Parser<'_> {
    Parser::new_ext(text, options())
}

/// Render markdown text to an HTML fragment.
pub fn to_html(text: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, parser(text));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_and_paragraph() {
        let html = to_html("# Welcome\n\nFirst task.");
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("<p>First task.</p>"));
    }

    #[test]
    fn emphasis_and_code() {
        let html = to_html("Use *markdown* and `code`.");
        assert!(html.contains("<em>markdown</em>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn list_items() {
        let html = to_html("- one\n- two\n");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(to_html(""), "");
    }
}
