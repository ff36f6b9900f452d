//! Helpers for note markup: document sanitizing, Markdown input
//! and plain-text previews.
//!
//! The store itself never looks inside note content. These functions are
//! only used at the edges: when a note is rendered into a document, when the
//! CLI accepts Markdown, and when a listing shows a preview line.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use regex::{Captures, Regex};

const H1_STYLE: &str = "font-size: 24px; font-weight: 700; margin: 20px 0 15px 0; color: #217f8b;";
const H2_STYLE: &str = "font-size: 20px; font-weight: 700; margin: 18px 0 12px 0; color: #217f8b;";
const H3_STYLE: &str = "font-size: 18px; font-weight: 700; margin: 16px 0 10px 0; color: #217f8b;";
const P_STYLE: &str = "margin: 10px 0; line-height: 1.8;";
const LIST_STYLE: &str = "margin: 10px 0; padding-left: 20px;";
const LI_STYLE: &str = "margin: 5px 0;";
const STRONG_STYLE: &str = "font-weight: 700;";
const EM_STYLE: &str = "font-style: italic;";

pub const EMPTY_DOCUMENT_BODY: &str = "<p>This note is empty.</p>";

static STYLE_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\s*style\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#)
        .expect("style attribute regex")
});

/// A `color` declaration, not `background-color` or `border-color`.
static COLOR_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|;)\s*color\s*:").expect("color declaration regex"));

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

/// Opening tags rewritten for documents, paired with their replacement.
/// Any attributes on the original tag are dropped.
static TAG_RULES: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    let styled = |tag: &str, style: &str| format!(r#"<{} style="{}">"#, tag, style);
    [
        ("h1", styled("h1", H1_STYLE)),
        ("h2", styled("h2", H2_STYLE)),
        ("h3", styled("h3", H3_STYLE)),
        ("p", styled("p", P_STYLE)),
        ("ul", styled("ul", LIST_STYLE)),
        ("ol", styled("ol", LIST_STYLE)),
        ("li", styled("li", LI_STYLE)),
        ("strong", styled("strong", STRONG_STYLE)),
        ("b", styled("strong", STRONG_STYLE)),
        ("em", styled("em", EM_STYLE)),
        ("i", styled("em", EM_STYLE)),
    ]
    .into_iter()
    .map(|(tag, replacement)| {
        let re = Regex::new(&format!(r"(?i)<{}\b[^>]*>", tag)).expect("tag rule regex");
        (re, replacement)
    })
    .collect()
});

static CLOSE_B: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</b\s*>").expect("close b regex"));
static CLOSE_I: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</i\s*>").expect("close i regex"));

/// Rewrite note markup so it renders predictably in an exported document.
///
/// Inline `style` attributes that do not set a color are stripped, then the
/// block and emphasis tags get fixed inline styles. `b`/`i` become
/// `strong`/`em`. Blank content yields a placeholder paragraph.
pub fn sanitize_for_document(content: &str) -> String {
    if content.trim().is_empty() {
        return EMPTY_DOCUMENT_BODY.to_string();
    }

    let mut out = STYLE_ATTR
        .replace_all(content, |caps: &Captures| {
            let value = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .map_or("", |m| m.as_str());
            if COLOR_DECL.is_match(value) {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned();

    for (re, replacement) in TAG_RULES.iter() {
        out = re.replace_all(&out, replacement.as_str()).into_owned();
    }
    out = CLOSE_B.replace_all(&out, "</strong>").into_owned();
    CLOSE_I.replace_all(&out, "</em>").into_owned()
}

/// Render Markdown into note markup.
pub fn markdown_to_markup(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Collapse markup into a single line of plain text.
pub fn plain_text(markup: &str) -> String {
    let stripped = TAG.replace_all(markup, " ");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_content_becomes_placeholder() {
        assert_eq!(sanitize_for_document("  \n"), EMPTY_DOCUMENT_BODY);
    }

    #[test]
    fn headings_and_paragraphs_get_fixed_styles() {
        let out = sanitize_for_document(r#"<h1 class="x">Title</h1><p>Body</p>"#);
        assert_eq!(
            out,
            format!(
                r#"<h1 style="{}">Title</h1><p style="{}">Body</p>"#,
                H1_STYLE, P_STYLE
            )
        );
    }

    #[test]
    fn b_and_i_become_strong_and_em() {
        let out = sanitize_for_document("<b>x</b> <i>y</i>");
        assert_eq!(
            out,
            format!(
                r#"<strong style="{}">x</strong> <em style="{}">y</em>"#,
                STRONG_STYLE, EM_STYLE
            )
        );
    }

    #[test]
    fn similar_tag_names_are_not_rewritten() {
        let out = sanitize_for_document("<br><img src=\"a.png\"><pre>x</pre>");
        assert_eq!(out, "<br><img src=\"a.png\"><pre>x</pre>");
    }

    #[test]
    fn color_styles_survive_other_styles_do_not() {
        let out = sanitize_for_document(
            r#"<span style="color: #f6bd60;">gold</span><span style="font-size: 40px">big</span>"#,
        );
        assert_eq!(out, r#"<span style="color: #f6bd60;">gold</span><span>big</span>"#);
    }

    #[test]
    fn single_quoted_and_background_color_styles_are_stripped() {
        let out = sanitize_for_document(
            r#"<span style='font-size:40px'>big</span><span style="background-color: red;">bg</span>"#,
        );
        assert_eq!(out, "<span>big</span><span>bg</span>");
    }

    #[test]
    fn color_declaration_after_other_declarations_survives() {
        let out = sanitize_for_document(r#"<span style='font-weight: 700; color: red'>x</span>"#);
        assert_eq!(out, r#"<span style='font-weight: 700; color: red'>x</span>"#);
    }

    #[test]
    fn markdown_renders_to_markup() {
        let out = markdown_to_markup("# Plan\n\nShip **now**");
        assert!(out.contains("<h1>Plan</h1>"));
        assert!(out.contains("<strong>now</strong>"));
    }

    #[test]
    fn plain_text_strips_tags_and_entities() {
        assert_eq!(
            plain_text("<h1>Plan</h1>\n<p>Tom &amp; Jerry&nbsp;<b>ship</b></p>"),
            "Plan Tom & Jerry ship"
        );
    }
}
