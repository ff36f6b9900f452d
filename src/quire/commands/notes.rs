use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Note, Notebook, DEFAULT_NOTE_TITLE};

use super::helpers::new_note_id;

/// Append an untitled note to a folder and make it the active note.
pub fn create(notebook: &mut Notebook, folder_id: &str) -> Result<CmdResult> {
    if notebook.folder(folder_id).is_none() {
        return Ok(CmdResult::default());
    }

    let note = Note::new(new_note_id(notebook));
    let Some(folder) = notebook.folder_mut(folder_id) else {
        return Ok(CmdResult::default());
    };
    folder.notes.push(note.clone());
    let folder_name = folder.name.clone();

    notebook.active_folder_id = Some(folder_id.to_string());
    notebook.active_note_id = Some(note.id.clone());

    let mut result = CmdResult::changed();
    result.add_message(CmdMessage::success(format!(
        "Note created in {}: {}",
        folder_name, note.id
    )));
    Ok(result.with_affected_notes(vec![note]))
}

/// Remove a note. Deleting the active note clears only the note reference.
pub fn delete(notebook: &mut Notebook, folder_id: &str, note_id: &str) -> Result<CmdResult> {
    let Some(folder) = notebook.folder_mut(folder_id) else {
        return Ok(CmdResult::default());
    };
    let Some(pos) = folder.notes.iter().position(|n| n.id == note_id) else {
        return Ok(CmdResult::default());
    };
    let removed = folder.notes.remove(pos);

    if notebook.is_active_note(note_id) {
        notebook.active_note_id = None;
    }

    let mut result = CmdResult::changed();
    result.add_message(CmdMessage::success(format!(
        "Note deleted: {}",
        removed.title
    )));
    Ok(result.with_affected_notes(vec![removed]))
}

/// Point the selection at a note. Nothing is validated here: the ids only
/// say what the editing surface should show next.
pub fn select(notebook: &mut Notebook, folder_id: &str, note_id: &str) -> Result<CmdResult> {
    notebook.active_folder_id = Some(folder_id.to_string());
    notebook.active_note_id = Some(note_id.to_string());

    let mut result = CmdResult::changed();
    if let Some(note) = notebook.active_note() {
        result.affected_notes.push(note.clone());
    }
    Ok(result)
}

/// Write title and content into the active note.
///
/// A blank title becomes [`DEFAULT_NOTE_TITLE`]. When neither field differs
/// from what is stored the result is unchanged, so no write happens.
pub fn save_current(notebook: &mut Notebook, title: &str, content: &str) -> Result<CmdResult> {
    let Some(note) = notebook.active_note_mut() else {
        return Ok(CmdResult::default());
    };

    let title = match title.trim() {
        "" => DEFAULT_NOTE_TITLE,
        trimmed => trimmed,
    };
    if note.title == title && note.content == content {
        return Ok(CmdResult::default().with_affected_notes(vec![note.clone()]));
    }

    note.title = title.to_string();
    note.content = content.to_string();

    let mut result = CmdResult::changed();
    result.add_message(CmdMessage::success(format!("Note saved: {}", note.title)));
    Ok(result.with_affected_notes(vec![note.clone()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::folders;
    use std::collections::HashSet;

    fn with_folder(name: &str) -> (Notebook, String) {
        let mut nb = Notebook::default();
        folders::create(&mut nb, name).unwrap();
        let id = nb.folders[0].id.clone();
        (nb, id)
    }

    #[test]
    fn create_appends_default_note_and_selects_it() {
        let (mut nb, folder_id) = with_folder("Work");
        let result = create(&mut nb, &folder_id).unwrap();
        assert!(result.changed);

        let note = &nb.folders[0].notes[0];
        assert_eq!(note.title, DEFAULT_NOTE_TITLE);
        assert!(note.content.is_empty());
        assert_eq!(nb.active_folder_id.as_deref(), Some(folder_id.as_str()));
        assert_eq!(nb.active_note_id.as_deref(), Some(note.id.as_str()));
    }

    #[test]
    fn create_in_unknown_folder_is_silent() {
        let (mut nb, _) = with_folder("Work");
        let result = create(&mut nb, "f_missing").unwrap();
        assert!(!result.changed);
        assert_eq!(nb.note_count(), 0);
        assert!(nb.active_note_id.is_none());
    }

    #[test]
    fn ids_stay_unique_across_creates_and_deletes() {
        let (mut nb, folder_id) = with_folder("Work");
        for round in 0..50 {
            create(&mut nb, &folder_id).unwrap();
            create(&mut nb, &folder_id).unwrap();
            if round % 3 == 0 {
                let first = nb.folders[0].notes[0].id.clone();
                delete(&mut nb, &folder_id, &first).unwrap();
            }
        }
        let ids: HashSet<_> = nb.folders[0].notes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids.len(), nb.folders[0].notes.len());
        assert!(!ids.contains(&folder_id));
    }

    #[test]
    fn deleting_active_note_keeps_active_folder() {
        let (mut nb, folder_id) = with_folder("Work");
        create(&mut nb, &folder_id).unwrap();
        let note_id = nb.active_note_id.clone().unwrap();

        delete(&mut nb, &folder_id, &note_id).unwrap();
        assert!(nb.folders[0].notes.is_empty());
        assert!(nb.active_note_id.is_none());
        assert_eq!(nb.active_folder_id.as_deref(), Some(folder_id.as_str()));
    }

    #[test]
    fn deleting_other_note_keeps_selection() {
        let (mut nb, folder_id) = with_folder("Work");
        create(&mut nb, &folder_id).unwrap();
        let first = nb.active_note_id.clone().unwrap();
        create(&mut nb, &folder_id).unwrap();
        let second = nb.active_note_id.clone().unwrap();

        delete(&mut nb, &folder_id, &first).unwrap();
        assert_eq!(nb.active_note_id.as_deref(), Some(second.as_str()));
    }

    #[test]
    fn delete_missing_note_is_silent() {
        let (mut nb, folder_id) = with_folder("Work");
        assert!(!delete(&mut nb, &folder_id, "n_missing").unwrap().changed);
        assert!(!delete(&mut nb, "f_missing", "n_missing").unwrap().changed);
    }

    #[test]
    fn select_does_not_validate() {
        let (mut nb, _) = with_folder("Work");
        let result = select(&mut nb, "f_ghost", "n_ghost").unwrap();
        assert!(result.changed);
        assert!(result.affected_notes.is_empty());
        assert_eq!(nb.active_folder_id.as_deref(), Some("f_ghost"));
        assert_eq!(nb.active_note_id.as_deref(), Some("n_ghost"));
        assert!(nb.active_note().is_none());
    }

    #[test]
    fn save_current_updates_fields() {
        let (mut nb, folder_id) = with_folder("Work");
        create(&mut nb, &folder_id).unwrap();

        let result = save_current(&mut nb, "  Plan ", "<p>Ship it</p>").unwrap();
        assert!(result.changed);
        let note = nb.active_note().unwrap();
        assert_eq!(note.title, "Plan");
        assert_eq!(note.content, "<p>Ship it</p>");
    }

    #[test]
    fn save_current_without_changes_is_noop() {
        let (mut nb, folder_id) = with_folder("Work");
        create(&mut nb, &folder_id).unwrap();
        save_current(&mut nb, "Plan", "<p>x</p>").unwrap();

        assert!(!save_current(&mut nb, "Plan", "<p>x</p>").unwrap().changed);
        assert!(!save_current(&mut nb, " Plan ", "<p>x</p>").unwrap().changed);
    }

    #[test]
    fn save_current_blank_title_uses_default() {
        let (mut nb, folder_id) = with_folder("Work");
        create(&mut nb, &folder_id).unwrap();
        save_current(&mut nb, "   ", "<p>body</p>").unwrap();
        assert_eq!(nb.active_note().unwrap().title, DEFAULT_NOTE_TITLE);
    }

    #[test]
    fn save_current_without_active_note_is_noop() {
        let (mut nb, _) = with_folder("Work");
        assert!(!save_current(&mut nb, "T", "C").unwrap().changed);
    }
}
