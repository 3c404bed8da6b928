//! Display rendering for diffs and answers.
//!
//! Note bodies and answers are user-authored and may embed arbitrary
//! markup, so every HTML string produced here passes through the
//! sanitizer before a caller may trust it. There is no unsanitized
//! escape hatch.

use crate::diff::{ChangeKind, ChangeSpan};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};

static SANITIZER: Lazy<ammonia::Builder<'static>> = Lazy::new(|| {
    let mut builder = ammonia::Builder::default();
    // The diff markup carries its kind in a class; everything else uses
    // ammonia's conservative defaults.
    builder.add_tag_attributes("div", &["class"]);
    builder
});

/// Render markdown (answers, note excerpts) to sanitized HTML.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    SANITIZER.clean(&out).to_string()
}

/// Render a diff as one `div.diff-line` per line, tagged `diff-insert`
/// or `diff-delete` for changed lines. The span text itself is escaped,
/// never interpreted.
pub fn render_diff(spans: &[ChangeSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        let class = match span.kind {
            ChangeKind::Added => "diff-line diff-insert",
            ChangeKind::Removed => "diff-line diff-delete",
            ChangeKind::Unchanged => "diff-line",
        };
        for line in span.text.lines() {
            out.push_str(&format!(
                "<div class=\"{}\">{}</div>",
                class,
                escape_text(line)
            ));
        }
    }
    SANITIZER.clean(&out).to_string()
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
