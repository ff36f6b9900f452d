//! # Editing Surface
//!
//! The store never edits markup itself. Whatever widget the UI provides is
//! wrapped in an [`EditingSurface`]: it hands out its current markup, accepts
//! new markup, applies formatting commands to its selection, and reports
//! which formats are active at the cursor.
//!
//! [`MarkupSurface`] is the in-process implementation: a markup buffer with a
//! byte-range selection. The CLI uses it for `note format` and `note color`,
//! and the tests use it to exercise the store's surface integration.
//!
//! After every command the UI re-derives its [`ToolbarState`] from the
//! surface; there is no cached toolbar state anywhere else.

use crate::error::{QuireError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InlineFormat {
    Bold,
    Italic,
    Underline,
    Heading1,
    Heading2,
    Heading3,
}

impl InlineFormat {
    /// Toolbar order.
    pub const ALL: [InlineFormat; 6] = [
        InlineFormat::Bold,
        InlineFormat::Italic,
        InlineFormat::Underline,
        InlineFormat::Heading1,
        InlineFormat::Heading2,
        InlineFormat::Heading3,
    ];

    /// Tag written when the format is applied.
    pub fn tag(self) -> &'static str {
        match self {
            InlineFormat::Bold => "strong",
            InlineFormat::Italic => "em",
            InlineFormat::Underline => "u",
            InlineFormat::Heading1 => "h1",
            InlineFormat::Heading2 => "h2",
            InlineFormat::Heading3 => "h3",
        }
    }

    /// Format a tag name stands for, accepting the legacy `b`/`i` forms.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "strong" | "b" => Some(InlineFormat::Bold),
            "em" | "i" => Some(InlineFormat::Italic),
            "u" => Some(InlineFormat::Underline),
            "h1" => Some(InlineFormat::Heading1),
            "h2" => Some(InlineFormat::Heading2),
            "h3" => Some(InlineFormat::Heading3),
            _ => None,
        }
    }
}

impl fmt::Display for InlineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InlineFormat::Bold => "bold",
            InlineFormat::Italic => "italic",
            InlineFormat::Underline => "underline",
            InlineFormat::Heading1 => "h1",
            InlineFormat::Heading2 => "h2",
            InlineFormat::Heading3 => "h3",
        };
        f.write_str(label)
    }
}

impl FromStr for InlineFormat {
    type Err = QuireError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bold" | "b" => Ok(InlineFormat::Bold),
            "italic" | "i" => Ok(InlineFormat::Italic),
            "underline" | "u" => Ok(InlineFormat::Underline),
            "h1" | "heading1" => Ok(InlineFormat::Heading1),
            "h2" | "heading2" => Ok(InlineFormat::Heading2),
            "h3" | "heading3" => Ok(InlineFormat::Heading3),
            other => Err(QuireError::Api(format!("Unknown format: {}", other))),
        }
    }
}

/// A command issued against a surface's selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    /// Apply the format, or remove it if the selection is already wrapped in it.
    Toggle(InlineFormat),
    /// Set the text color of the selection.
    Color(String),
}

pub trait EditingSurface {
    /// Current markup.
    fn content(&self) -> String;

    /// Replace the markup, resetting any selection.
    fn set_content(&mut self, markup: &str);

    fn apply_format(&mut self, command: &FormatCommand) -> Result<()>;

    /// Formats in effect at the start of the selection.
    fn active_formats(&self) -> BTreeSet<InlineFormat>;
}

static COLOR_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#[0-9a-fA-F]{3,8}|[a-zA-Z]+|rgba?\([0-9.,%\s]+\))$").expect("color value regex")
});

static COLOR_SPAN_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<span style="color: [^";]*;">$"#).expect("color span regex")
});

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link", "wbr"];
const COLOR_SPAN_CLOSE: &str = "</span>";

/// Markup buffer with a selection, the in-process [`EditingSurface`].
#[derive(Debug, Clone, Default)]
pub struct MarkupSurface {
    markup: String,
    selection: Range<usize>,
}

impl MarkupSurface {
    pub fn new(markup: &str) -> Self {
        Self {
            markup: markup.to_string(),
            selection: 0..0,
        }
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn selected_text(&self) -> &str {
        &self.markup[self.selection.clone()]
    }

    /// Select a byte range of the markup.
    pub fn select(&mut self, range: Range<usize>) -> Result<()> {
        if range.start > range.end
            || range.end > self.markup.len()
            || !self.markup.is_char_boundary(range.start)
            || !self.markup.is_char_boundary(range.end)
        {
            return Err(QuireError::Api(format!(
                "Invalid selection {}..{} for {} bytes of markup",
                range.start,
                range.end,
                self.markup.len()
            )));
        }
        self.selection = range;
        Ok(())
    }

    pub fn select_all(&mut self) {
        self.selection = 0..self.markup.len();
    }

    /// Select everything inside the elements that wrap the whole markup.
    /// On `<strong><em>x</em></strong>` this selects `x`, so toggling a
    /// format twice from a fresh surface takes it off again.
    pub fn select_contents(&mut self) {
        let mut range = 0..self.markup.len();
        while let Some(inner) = peel_wrapper(&self.markup[range.clone()]) {
            range = range.start + inner.start..range.start + inner.end;
        }
        self.selection = range;
    }

    fn is_wrapped_by(&self, open: &str, close: &str) -> bool {
        let Range { start, end } = self.selection;
        self.markup[..start].ends_with(open) && self.markup[end..].starts_with(close)
    }

    fn unwrap_selection(&mut self, open_len: usize, close_len: usize) {
        let Range { start, end } = self.selection.clone();
        self.markup.replace_range(end..end + close_len, "");
        self.markup.replace_range(start - open_len..start, "");
        self.selection = start - open_len..end - open_len;
    }

    fn wrap_selection(&mut self, open: &str, close: &str) {
        let Range { start, end } = self.selection.clone();
        self.markup.insert_str(end, close);
        self.markup.insert_str(start, open);
        self.selection = start + open.len()..end + open.len();
    }

    /// Spans of the opening and closing tags of the innermost element that
    /// applies `format` at the selection start.
    fn enclosing_element(&self, format: InlineFormat) -> Option<(Range<usize>, Range<usize>)> {
        let open = open_elements(&self.markup[..self.selection.start])
            .into_iter()
            .rev()
            .find(|tag| InlineFormat::from_tag(&tag.name) == Some(format))?;
        let close = find_close(&self.markup, &open)?;
        Some((open.span, close))
    }

    fn remove_element(&mut self, open: Range<usize>, close: Range<usize>) {
        let shift = |pos: usize| pos - overlap(pos, &open) - overlap(pos, &close);
        let selection = shift(self.selection.start)..shift(self.selection.end);
        self.markup.replace_range(close, "");
        self.markup.replace_range(open, "");
        self.selection = selection;
    }

    fn toggle(&mut self, format: InlineFormat) {
        let open = format!("<{}>", format.tag());
        let close = format!("</{}>", format.tag());
        if self.is_wrapped_by(&open, &close) {
            self.unwrap_selection(open.len(), close.len());
        } else if let Some((open_span, close_span)) = self.enclosing_element(format) {
            self.remove_element(open_span, close_span);
        } else {
            self.wrap_selection(&open, &close);
        }
    }

    fn color(&mut self, value: &str) -> Result<()> {
        let value = value.trim();
        if !COLOR_VALUE.is_match(value) {
            return Err(QuireError::Api(format!("Invalid color: {}", value)));
        }
        let open = format!(r#"<span style="color: {};">"#, value);

        let Range { start, end } = self.selection.clone();
        let existing = COLOR_SPAN_OPEN
            .find(&self.markup[..start])
            .map(|m| m.len())
            .filter(|_| self.markup[end..].starts_with(COLOR_SPAN_CLOSE));

        match existing {
            Some(old_len) => {
                self.markup.replace_range(start - old_len..start, &open);
                self.selection = start - old_len + open.len()..end - old_len + open.len();
            }
            None => self.wrap_selection(&open, COLOR_SPAN_CLOSE),
        }
        Ok(())
    }
}

impl EditingSurface for MarkupSurface {
    fn content(&self) -> String {
        self.markup.clone()
    }

    fn set_content(&mut self, markup: &str) {
        self.markup = markup.to_string();
        self.selection = 0..0;
    }

    fn apply_format(&mut self, command: &FormatCommand) -> Result<()> {
        match command {
            FormatCommand::Toggle(format) => {
                self.toggle(*format);
                Ok(())
            }
            FormatCommand::Color(value) => self.color(value),
        }
    }

    fn active_formats(&self) -> BTreeSet<InlineFormat> {
        open_elements(&self.markup[..self.selection.start])
            .iter()
            .filter_map(|tag| InlineFormat::from_tag(&tag.name))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Open,
    Close,
}

#[derive(Debug, Clone)]
struct Tag {
    name: String,
    kind: TagKind,
    span: Range<usize>,
}

/// Opening and closing tags in `markup` with their byte spans. Comments,
/// declarations, self-closing and void tags are skipped.
fn scan_tags(markup: &str) -> Vec<Tag> {
    let mut tags = Vec::new();
    let mut offset = 0;

    while let Some(lt) = markup[offset..].find('<') {
        let start = offset + lt;
        let Some(gt) = markup[start + 1..].find('>') else {
            break;
        };
        let end = start + gt + 2;
        let inner = markup[start + 1..end - 1].trim();
        offset = end;

        if inner.starts_with('!') || inner.starts_with('?') || inner.ends_with('/') {
            continue;
        }
        let (kind, rest) = match inner.strip_prefix('/') {
            Some(rest) => (TagKind::Close, rest.trim_start()),
            None => (TagKind::Open, inner),
        };
        let name: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        if name.is_empty() || VOID_TAGS.contains(&name.as_str()) {
            continue;
        }
        tags.push(Tag {
            name,
            kind,
            span: start..end,
        });
    }
    tags
}

/// Opening tags of the elements still open at the end of `markup`,
/// outermost first.
fn open_elements(markup: &str) -> Vec<Tag> {
    let mut stack: Vec<Tag> = Vec::new();
    for tag in scan_tags(markup) {
        match tag.kind {
            TagKind::Open => stack.push(tag),
            TagKind::Close => {
                if let Some(pos) = stack.iter().rposition(|open| open.name == tag.name) {
                    stack.truncate(pos);
                }
            }
        }
    }
    stack
}

/// Span of the tag that closes `open`, skipping nested elements of the same name.
fn find_close(markup: &str, open: &Tag) -> Option<Range<usize>> {
    let base = open.span.end;
    let mut depth = 0usize;
    for tag in scan_tags(&markup[base..]) {
        if tag.name != open.name {
            continue;
        }
        match tag.kind {
            TagKind::Open => depth += 1,
            TagKind::Close if depth == 0 => {
                return Some(base + tag.span.start..base + tag.span.end)
            }
            TagKind::Close => depth -= 1,
        }
    }
    None
}

/// Bytes of `span` that lie before `pos`.
fn overlap(pos: usize, span: &Range<usize>) -> usize {
    pos.min(span.end).saturating_sub(span.start)
}

/// Byte range inside `region` when a single element spans all of it.
fn peel_wrapper(region: &str) -> Option<Range<usize>> {
    let rest = region.strip_prefix('<')?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    if name.is_empty() || VOID_TAGS.contains(&name.as_str()) {
        return None;
    }

    let open_end = region.find('>')? + 1;
    let close = format!("</{}>", name);
    if region.len() < open_end + close.len() || !region.to_ascii_lowercase().ends_with(&close) {
        return None;
    }

    let inner = open_end..region.len() - close.len();
    is_balanced(&region[inner.clone()]).then_some(inner)
}

/// True when every element opened in `markup` is closed in it, in order.
fn is_balanced(markup: &str) -> bool {
    let mut stack: Vec<String> = Vec::new();
    for tag in scan_tags(markup) {
        match tag.kind {
            TagKind::Open => stack.push(tag.name),
            TagKind::Close => {
                if stack.pop() != Some(tag.name) {
                    return false;
                }
            }
        }
    }
    stack.is_empty()
}

/// Toolbar button states, derived from a surface after each change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarState {
    pub buttons: Vec<(InlineFormat, bool)>,
}

impl ToolbarState {
    pub fn from_surface(surface: &dyn EditingSurface) -> Self {
        let active = surface.active_formats();
        Self {
            buttons: InlineFormat::ALL
                .iter()
                .map(|format| (*format, active.contains(format)))
                .collect(),
        }
    }

    pub fn is_active(&self, format: InlineFormat) -> bool {
        self.buttons
            .iter()
            .any(|(f, active)| *f == format && *active)
    }
}
