use crate::model::Notebook;
use uuid::Uuid;

pub const FOLDER_ID_PREFIX: &str = "f_";
pub const NOTE_ID_PREFIX: &str = "n_";

/// A fresh identifier that no folder or note in `notebook` uses yet.
///
/// Random v4 UUIDs; the loop covers ids that arrived through an import.
pub fn generate_id(notebook: &Notebook, prefix: &str) -> String {
    loop {
        let id = format!("{}{}", prefix, Uuid::new_v4().simple());
        if !notebook.contains_id(&id) {
            return id;
        }
    }
}

pub fn new_folder_id(notebook: &Notebook) -> String {
    generate_id(notebook, FOLDER_ID_PREFIX)
}

pub fn new_note_id(notebook: &Notebook) -> String {
    generate_id(notebook, NOTE_ID_PREFIX)
}

/// Resolve a user-supplied folder reference: exact id first, then a
/// case-insensitive name match.
pub fn resolve_folder_ref(notebook: &Notebook, reference: &str) -> Option<String> {
    if let Some(folder) = notebook.folder(reference) {
        return Some(folder.id.clone());
    }
    let wanted = reference.trim().to_lowercase();
    notebook
        .folders
        .iter()
        .find(|f| f.name.to_lowercase() == wanted)
        .map(|f| f.id.clone())
}

/// Resolve a note reference inside a folder: exact id first, then the first
/// note whose title matches case-insensitively.
pub fn resolve_note_ref(notebook: &Notebook, folder_id: &str, reference: &str) -> Option<String> {
    let folder = notebook.folder(folder_id)?;
    if let Some(note) = folder.note(reference) {
        return Some(note.id.clone());
    }
    let wanted = reference.trim().to_lowercase();
    folder
        .notes
        .iter()
        .find(|n| n.title.to_lowercase() == wanted)
        .map(|n| n.id.clone())
}
