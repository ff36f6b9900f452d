//! Whole-notebook export and import as JSON text.

use crate::error::{QuireError, Result};
use crate::model::Notebook;
use serde_json::Value;
use std::collections::HashSet;

/// Pretty-printed JSON for the whole notebook.
pub fn export(notebook: &Notebook) -> Result<String> {
    serde_json::to_string_pretty(notebook).map_err(QuireError::Serialization)
}

/// Parse a serialized notebook, checking its shape only.
///
/// Rejects text that is not JSON, has no `folders` array, or has folders or
/// notes of the wrong shape. Stored notebooks are read with this so that data
/// written by an older or looser writer still loads.
pub fn parse(text: &str) -> Result<Notebook> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| QuireError::Import(format!("not valid JSON ({})", e)))?;

    match value.get("folders") {
        Some(Value::Array(_)) => {}
        Some(_) => return Err(QuireError::Import("\"folders\" is not an array".into())),
        None => return Err(QuireError::Import("missing \"folders\"".into())),
    }

    serde_json::from_value(value)
        .map_err(|e| QuireError::Import(format!("unexpected notebook shape ({})", e)))
}

/// Parse an import file: [`parse`], plus every folder and note id must be
/// unique across the notebook.
pub fn parse_import(text: &str) -> Result<Notebook> {
    let notebook = parse(text)?;
    check_unique_ids(&notebook)?;
    Ok(notebook)
}

fn check_unique_ids(notebook: &Notebook) -> Result<()> {
    let mut seen = HashSet::new();
    for folder in &notebook.folders {
        if !seen.insert(folder.id.as_str()) {
            return Err(QuireError::Import(format!("duplicate id {}", folder.id)));
        }
        for note in &folder.notes {
            if !seen.insert(note.id.as_str()) {
                return Err(QuireError::Import(format!("duplicate id {}", note.id)));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{folders, notes};

    fn populated() -> Notebook {
        let mut nb = Notebook::default();
        folders::create(&mut nb, "Work").unwrap();
        folders::create(&mut nb, "Home").unwrap();
        let work = nb.folders[0].id.clone();
        notes::create(&mut nb, &work).unwrap();
        notes::save_current(&mut nb, "Plan", "<p>\"quoted\" & <b>bold</b></p>").unwrap();
        nb
    }

    #[test]
    fn export_then_parse_reproduces_notebook() {
        let nb = populated();
        let text = export(&nb).unwrap();
        assert!(text.contains('\n'), "export should be pretty-printed");
        assert_eq!(parse_import(&text).unwrap(), nb);
    }

    #[test]
    fn rejects_non_array_folders() {
        let err = parse(r#"{"folders":"not-an-array"}"#).unwrap_err();
        assert!(matches!(err, QuireError::Import(_)));
    }

    #[test]
    fn rejects_garbage_and_missing_folders() {
        assert!(parse("not json at all").is_err());
        assert!(parse(r#"{"activeFolderId":null}"#).is_err());
        assert!(parse("[]").is_err());
    }

    #[test]
    fn rejects_malformed_folder_entries() {
        assert!(parse(r#"{"folders":[{"id":"f_1"}]}"#).is_err());
        assert!(parse(r#"{"folders":[{"id":"f_1","name":"A","notes":[{"id":"n_1"}]}]}"#).is_err());
    }

    #[test]
    fn import_rejects_duplicate_ids() {
        let text = r#"{"folders":[
            {"id":"f_1","name":"A","notes":[]},
            {"id":"f_1","name":"B","notes":[]}
        ]}"#;
        assert!(matches!(parse_import(text), Err(QuireError::Import(_))));

        let notes = r#"{"folders":[{"id":"f_1","name":"A","notes":[
            {"id":"n_1","title":"a","content":""},
            {"id":"n_1","title":"b","content":""}
        ]}]}"#;
        assert!(parse_import(notes).is_err());
    }

    #[test]
    fn shape_only_parse_accepts_duplicate_ids() {
        let text = r#"{"folders":[{"id":"f_1","name":"Mine","notes":[
            {"id":"n_1","title":"a","content":"<p>a</p>"},
            {"id":"n_1","title":"b","content":"<p>b</p>"}
        ]}]}"#;
        let nb = parse(text).unwrap();
        assert_eq!(nb.folders[0].name, "Mine");
        assert_eq!(nb.folders[0].notes.len(), 2);
    }

    #[test]
    fn accepts_dangling_selection() {
        let text = r#"{"folders":[],"activeFolderId":"f_gone","activeNoteId":"n_gone"}"#;
        let nb = parse(text).unwrap();
        assert_eq!(nb.active_folder_id.as_deref(), Some("f_gone"));
        assert!(nb.active_note().is_none());
    }
}
