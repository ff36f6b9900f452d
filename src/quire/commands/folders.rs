use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuireError, Result};
use crate::model::{Folder, Notebook, MAX_FOLDER_NAME_LEN};

use super::helpers::new_folder_id;

/// Append a new, empty folder. Blank names are ignored.
pub fn create(notebook: &mut Notebook, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(CmdResult::default());
    }

    let folder = Folder::new(new_folder_id(notebook), name.to_string());
    notebook.folders.push(folder.clone());

    let mut result = CmdResult::changed();
    result.add_message(CmdMessage::success(format!("Folder created: {}", name)));
    Ok(result.with_affected_folders(vec![folder]))
}

/// Rename a folder in place.
///
/// Validation failures leave the notebook untouched and come back as
/// [`QuireError::InvalidFolderName`]. An unknown id is a no-op.
pub fn rename(notebook: &mut Notebook, id: &str, new_name: &str) -> Result<CmdResult> {
    let Some(current) = notebook.folder(id).map(|f| f.name.clone()) else {
        return Ok(CmdResult::default());
    };

    let name = new_name.trim();
    validate_rename(notebook, id, &current, name)?;

    let folder = match notebook.folder_mut(id) {
        Some(folder) => folder,
        None => return Ok(CmdResult::default()),
    };
    folder.name = name.to_string();
    let renamed = folder.clone();

    let mut result = CmdResult::changed();
    result.add_message(CmdMessage::success(format!(
        "Folder renamed to \"{}\"",
        name
    )));
    Ok(result.with_affected_folders(vec![renamed]))
}

fn validate_rename(notebook: &Notebook, id: &str, current: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(QuireError::InvalidFolderName(
            "name cannot be empty".to_string(),
        ));
    }
    if name == current {
        return Err(QuireError::InvalidFolderName(format!(
            "\"{}\" is already the folder's name",
            name
        )));
    }
    let lowered = name.to_lowercase();
    if notebook
        .folders
        .iter()
        .any(|f| f.id != id && f.name.to_lowercase() == lowered)
    {
        return Err(QuireError::InvalidFolderName(
            "a folder with this name already exists".to_string(),
        ));
    }
    if name.chars().count() > MAX_FOLDER_NAME_LEN {
        return Err(QuireError::InvalidFolderName(format!(
            "name is too long (maximum {} characters)",
            MAX_FOLDER_NAME_LEN
        )));
    }
    Ok(())
}

/// Remove a folder and every note in it.
pub fn delete(notebook: &mut Notebook, id: &str) -> Result<CmdResult> {
    let Some(pos) = notebook.folders.iter().position(|f| f.id == id) else {
        return Ok(CmdResult::default());
    };

    let removed = notebook.folders.remove(pos);
    if notebook.is_active_folder(id) {
        notebook.clear_selection();
    }

    let mut result = CmdResult::changed();
    result.add_message(CmdMessage::success(format!(
        "Folder deleted: {} ({} notes)",
        removed.name,
        removed.notes.len()
    )));
    Ok(result.with_affected_folders(vec![removed]))
}

/// Expand `id` if it is not the active folder, collapse it otherwise.
///
/// Only the folder reference moves; the active note id is left alone.
pub fn toggle_expansion(notebook: &mut Notebook, id: &str) -> Result<CmdResult> {
    if notebook.is_active_folder(id) {
        notebook.active_folder_id = None;
    } else {
        notebook.active_folder_id = Some(id.to_string());
    }
    Ok(CmdResult::changed())
}
