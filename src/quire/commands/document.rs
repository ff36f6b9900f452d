use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuireError, Result};
use crate::markup::sanitize_for_document;
use crate::model::{Note, Notebook};
use crate::templates::{self, DOCUMENT_TEMPLATE_NAME};
use chrono::{DateTime, Local, TimeZone};
use minijinja::{context, Value};
use std::fs;
use std::path::Path;

/// Export the active note as a standalone document in `export_dir`.
///
/// Works on a copy of the note; nothing in the notebook changes.
pub fn run(notebook: &Notebook, export_dir: &Path) -> Result<CmdResult> {
    let note = notebook
        .active_note()
        .cloned()
        .ok_or_else(|| QuireError::Api("No note selected to export".to_string()))?;

    let now = Local::now();
    let document = render(&note, &now)?;
    let path = export_dir.join(file_name(&note.title, now.timestamp_millis()));

    write_document(export_dir, &path, &document)
        .map_err(|e| QuireError::Export(format!("could not write {}: {}", path.display(), e)))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported \"{}\" to {}",
        note.title,
        path.display()
    )));
    Ok(result.with_paths(vec![path]).with_affected_notes(vec![note]))
}

fn write_document(dir: &Path, path: &Path, document: &str) -> std::io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, document)
}

/// `<title slug>_<millis>.html`: every non-alphanumeric ASCII character of
/// the title becomes `_`, then the whole thing is lowercased.
pub fn file_name(title: &str, millis: i64) -> String {
    format!("{}_{}.html", slug(title), millis)
}

pub fn slug(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .to_lowercase()
}

/// Render a note into a self-contained HTML page.
pub fn render<Tz: TimeZone>(note: &Note, exported_at: &DateTime<Tz>) -> Result<String>
where
    Tz::Offset: std::fmt::Display,
{
    let body = sanitize_for_document(&note.content);
    templates::render(
        DOCUMENT_TEMPLATE_NAME,
        context! {
            title => note.title.as_str(),
            exported_at => exported_at.format("%B %-d, %Y %H:%M").to_string(),
            body => Value::from_safe_string(body),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{folders, notes};
    use crate::markup::EMPTY_DOCUMENT_BODY;
    use chrono::Utc;
    use tempfile::TempDir;

    fn notebook_with_note(title: &str, content: &str) -> Notebook {
        let mut nb = Notebook::default();
        folders::create(&mut nb, "Work").unwrap();
        let id = nb.folders[0].id.clone();
        notes::create(&mut nb, &id).unwrap();
        notes::save_current(&mut nb, title, content).unwrap();
        nb
    }

    #[test]
    fn file_name_slugs_title() {
        assert_eq!(file_name("Q3 Plan: Draft!", 42), "q3_plan__draft__42.html");
        assert_eq!(slug("Café"), "caf_");
    }

    #[test]
    fn render_escapes_title_and_sanitizes_body() {
        let mut note = Note::new("n_1".into());
        note.title = "<Plan> & more".into();
        note.content = "<b>ship</b>".into();
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();

        let doc = render(&note, &at).unwrap();
        assert!(doc.contains("<title>&lt;Plan&gt; &amp; more</title>"));
        assert!(doc.contains("March 5, 2024 14:30"));
        assert!(doc.contains(r#"<strong style="font-weight: 700;">ship</strong>"#));
    }

    #[test]
    fn render_escapes_markup_in_title_but_not_body() {
        let mut note = Note::new("n_1".into());
        note.title = "<script>alert(1)</script>".into();
        note.content = "<p>kept</p>".into();

        let doc = render(&note, &Utc::now()).unwrap();
        assert!(!doc.contains("<script>"));
        assert!(doc.contains("&lt;script&gt;"));
        assert!(doc.contains(r#"<p style="margin: 10px 0; line-height: 1.8;">kept</p>"#));
    }

    #[test]
    fn render_empty_note_uses_placeholder() {
        let note = Note::new("n_1".into());
        let doc = render(&note, &Utc::now()).unwrap();
        assert!(doc.contains(EMPTY_DOCUMENT_BODY));
    }

    #[test]
    fn run_writes_document_for_active_note() {
        let temp = TempDir::new().unwrap();
        let nb = notebook_with_note("Plan", "<p>body</p>");
        let before = nb.clone();

        let result = run(&nb, &temp.path().join("docs")).unwrap();
        assert!(!result.changed);
        assert_eq!(result.paths.len(), 1);

        let path = &result.paths[0];
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("plan_") && name.ends_with(".html"));
        assert!(fs::read_to_string(path).unwrap().contains("body"));
        assert_eq!(nb, before);
    }

    #[test]
    fn run_without_active_note_fails() {
        let temp = TempDir::new().unwrap();
        let mut nb = notebook_with_note("Plan", "");
        nb.active_note_id = None;
        assert!(run(&nb, temp.path()).is_err());
    }
}
