use crate::model::{Folder, Note, Notebook};

use super::helpers::{new_folder_id, new_note_id};

pub const SAMPLE_FOLDER_NAME: &str = "Getting Started";
pub const SAMPLE_NOTE_TITLE: &str = "Welcome to Quire";

const SAMPLE_NOTE_CONTENT: &str = r#"<h1>Welcome to Quire</h1>
<p>This is your local-first notebook. Start writing your notes here.</p>
<p>You can select text to apply <span style="color: #f6bd60;">colors</span> and <strong>formatting</strong>.</p>
<h2>Features</h2>
<ul>
<li>Create folders and notes</li>
<li>Rich text editing with bold, italic, underline, headings and colors</li>
<li>Automatic saving after every change</li>
<li>Export notes as documents or archive the whole notebook</li>
</ul>
<h3>Shortcuts</h3>
<ul>
<li><strong>quire note edit</strong> - edit the active note in $EDITOR</li>
<li><strong>quire note format bold</strong> - toggle bold on the active note</li>
<li><strong>quire doc</strong> - export the active note</li>
</ul>"#;

/// Add the sample folder and note when the notebook has no folders.
///
/// The sample becomes the active folder and note. Returns whether anything
/// was added.
pub fn seed_if_empty(notebook: &mut Notebook) -> bool {
    if !notebook.folders.is_empty() {
        return false;
    }

    let mut folder = Folder::new(new_folder_id(notebook), SAMPLE_FOLDER_NAME.to_string());
    let mut note = Note::new(new_note_id(notebook));
    note.title = SAMPLE_NOTE_TITLE.to_string();
    note.content = SAMPLE_NOTE_CONTENT.to_string();

    notebook.active_folder_id = Some(folder.id.clone());
    notebook.active_note_id = Some(note.id.clone());
    folder.notes.push(note);
    notebook.folders.push(folder);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_empty_notebook_and_selects_sample() {
        let mut nb = Notebook::default();
        assert!(seed_if_empty(&mut nb));
        assert_eq!(nb.folders[0].name, SAMPLE_FOLDER_NAME);
        assert_eq!(nb.active_note().unwrap().title, SAMPLE_NOTE_TITLE);
        assert_ne!(nb.folders[0].id, nb.folders[0].notes[0].id);
    }

    #[test]
    fn leaves_populated_notebook_alone() {
        let mut nb = Notebook::default();
        nb.folders.push(Folder::new("f_1".into(), "Mine".into()));
        assert!(!seed_if_empty(&mut nb));
        assert_eq!(nb.folders.len(), 1);
    }
}
