use crate::error::{QuireError, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// A note as it appears in an editor buffer.
/// Format: title\n\ncontent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContent {
    pub title: String,
    pub content: String,
}

impl EditorContent {
    pub fn new(title: String, content: String) -> Self {
        Self { title, content }
    }

    pub fn to_buffer(&self) -> String {
        format!("{}\n\n{}", self.title, self.content)
    }

    /// First line is the title; leading blank lines after it are skipped and
    /// the rest is content, kept verbatim apart from trailing whitespace.
    pub fn from_buffer(buffer: &str) -> Self {
        let (title, rest) = match buffer.split_once('\n') {
            Some((title, rest)) => (title, rest),
            None => (buffer, ""),
        };

        let content = rest
            .trim_start_matches(|c: char| c == '\n' || c == '\r')
            .trim_end();

        Self {
            title: title.trim().to_string(),
            content: content.to_string(),
        }
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(QuireError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments, e.g. "code --wait"
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| QuireError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(QuireError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(QuireError::Io)
}

/// Opens an editor on a temporary `.html` buffer holding `initial` and
/// returns what the user saved.
pub fn edit_content(initial: &EditorContent) -> Result<EditorContent> {
    let temp_file = env::temp_dir().join(format!("quire_edit_{}.html", std::process::id()));

    fs::write(&temp_file, initial.to_buffer()).map_err(QuireError::Io)?;
    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(EditorContent::from_buffer(&result?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_buffer_puts_blank_line_after_title() {
        let ec = EditorContent::new("My Title".into(), "<p>Body</p>".into());
        assert_eq!(ec.to_buffer(), "My Title\n\n<p>Body</p>");
    }

    #[test]
    fn from_buffer_splits_title_and_content() {
        let ec = EditorContent::from_buffer("My Title\n\n<p>one</p>\n<p>two</p>\n");
        assert_eq!(ec.title, "My Title");
        assert_eq!(ec.content, "<p>one</p>\n<p>two</p>");
    }

    #[test]
    fn from_buffer_title_only() {
        let ec = EditorContent::from_buffer("Only a title");
        assert_eq!(ec.title, "Only a title");
        assert_eq!(ec.content, "");
    }

    #[test]
    fn from_buffer_without_blank_separator() {
        let ec = EditorContent::from_buffer("Title\n<p>x</p>");
        assert_eq!(ec.content, "<p>x</p>");
    }

    #[test]
    fn from_buffer_keeps_inner_indentation() {
        let ec = EditorContent::from_buffer("T\n\n<ul>\n  <li>a</li>\n</ul>");
        assert_eq!(ec.content, "<ul>\n  <li>a</li>\n</ul>");
    }

    #[test]
    fn roundtrip() {
        let original = EditorContent::new("Plan".into(), "<h1>Plan</h1>\n<p>x</p>".into());
        assert_eq!(EditorContent::from_buffer(&original.to_buffer()), original);
    }
}
