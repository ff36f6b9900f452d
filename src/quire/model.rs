use serde::{Deserialize, Serialize};

/// Title given to new notes and to notes saved with a blank title.
pub const DEFAULT_NOTE_TITLE: &str = "Untitled Note";

/// Folder names longer than this (in characters) are rejected on rename.
pub const MAX_FOLDER_NAME_LEN: usize = 50;

/// Markup an editing surface shows when there is no note to display.
pub const EMPTY_NOTE_MARKUP: &str = "<p><br></p>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Rich-text markup produced by the editing surface. Stored verbatim.
    pub content: String,
}

impl Note {
    pub fn new(id: String) -> Self {
        Self {
            id,
            title: DEFAULT_NOTE_TITLE.to_string(),
            content: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub notes: Vec<Note>,
}

impl Folder {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            notes: Vec::new(),
        }
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn note_mut(&mut self, id: &str) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }
}

/// The aggregate root: every folder plus the current selection.
///
/// The active references are plain ids, not ownership. They may dangle
/// (for instance after an import), so every lookup through them returns
/// an `Option`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub active_folder_id: Option<String>,
    #[serde(default)]
    pub active_note_id: Option<String>,
}

impl Notebook {
    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    pub fn folder_mut(&mut self, id: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.id == id)
    }

    /// The active note, reachable only through the active folder.
    pub fn active_note(&self) -> Option<&Note> {
        let folder = self.folder(self.active_folder_id.as_deref()?)?;
        folder.note(self.active_note_id.as_deref()?)
    }

    pub fn active_note_mut(&mut self) -> Option<&mut Note> {
        let note_id = self.active_note_id.clone()?;
        let folder_id = self.active_folder_id.clone()?;
        self.folder_mut(&folder_id)?.note_mut(&note_id)
    }

    pub fn is_active_folder(&self, id: &str) -> bool {
        self.active_folder_id.as_deref() == Some(id)
    }

    pub fn is_active_note(&self, id: &str) -> bool {
        self.active_note_id.as_deref() == Some(id)
    }

    /// True if any folder or note in the notebook already uses `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.folders
            .iter()
            .any(|f| f.id == id || f.notes.iter().any(|n| n.id == id))
    }

    pub fn note_count(&self) -> usize {
        self.folders.iter().map(|f| f.notes.len()).sum()
    }

    pub fn clear_selection(&mut self) {
        self.active_folder_id = None;
        self.active_note_id = None;
    }
}
