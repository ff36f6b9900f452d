//! # API Facade
//!
//! [`QuireApi`] is the notebook store: it owns the [`Notebook`], the storage
//! backend and the key the notebook lives under, and it is the only way to
//! mutate either.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the command functions in `commands/*.rs`, which hold
//!   the actual logic and operate on a plain `&mut Notebook`
//! - **Persists** after every command that reports a change (write-through,
//!   one write per mutation, no batching)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## Failure Handling
//!
//! - Validation failures (bad folder names) and import failures come back as
//!   `Err` and leave the notebook untouched.
//! - Lookups of unknown ids are silent no-ops.
//! - Storage failures never fail an operation. Reads fall back to an empty
//!   notebook, writes are logged and surfaced as a warning message; the
//!   in-memory notebook stays authoritative either way.
//! - A stored value that cannot be read or parsed is never overwritten in
//!   place. Before the first write it is copied to `<key>.bak`; if it cannot
//!   even be read for that copy, nothing is written.
//!
//! ## Generic Over KeyValueStore
//!
//! - Production: `QuireApi<FileStore>`
//! - Testing: `QuireApi<InMemoryStore>`

use crate::commands;
use crate::config::QuireConfig;
use crate::error::Result;
use crate::model::{Note, Notebook, EMPTY_NOTE_MARKUP};
use crate::store::KeyValueStore;
use crate::surface::{EditingSurface, FormatCommand};
use std::path::Path;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct QuireApi<S: KeyValueStore> {
    store: S,
    key: String,
    notebook: Notebook,
    /// Set while the value under `key` is one we could not load.
    unreadable: bool,
}

impl<S: KeyValueStore> QuireApi<S> {
    /// Wrap an existing notebook without reading storage.
    pub fn new(store: S, key: impl Into<String>, notebook: Notebook) -> Self {
        Self {
            store,
            key: key.into(),
            notebook,
            unreadable: false,
        }
    }

    /// Load the notebook stored under the configured key, seeding the sample
    /// content when it comes back without folders and seeding is enabled.
    pub fn open(store: S, config: &QuireConfig) -> Self {
        let loaded = load_notebook(&store, &config.storage_key);
        let mut api = Self::new(store, config.storage_key.clone(), Notebook::default());
        api.apply_loaded(loaded);

        if config.seed_sample && commands::seed::seed_if_empty(&mut api.notebook) {
            log::debug!("seeded sample notebook");
            let mut result = CmdResult::changed();
            api.persist(&mut result);
        }
        api
    }

    /// Replace the in-memory notebook with what storage currently holds.
    pub fn reload(&mut self) {
        let loaded = load_notebook(&self.store, &self.key);
        self.apply_loaded(loaded);
    }

    fn apply_loaded(&mut self, loaded: Option<Notebook>) {
        self.unreadable = loaded.is_none();
        self.notebook = loaded.unwrap_or_default();
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_folder(&mut self, name: &str) -> Result<CmdResult> {
        let result = commands::folders::create(&mut self.notebook, name);
        self.commit(result)
    }

    pub fn rename_folder(&mut self, id: &str, new_name: &str) -> Result<CmdResult> {
        let result = commands::folders::rename(&mut self.notebook, id, new_name);
        self.commit(result)
    }

    pub fn delete_folder(&mut self, id: &str) -> Result<CmdResult> {
        let result = commands::folders::delete(&mut self.notebook, id);
        self.commit(result)
    }

    pub fn toggle_folder_expansion(&mut self, id: &str) -> Result<CmdResult> {
        let result = commands::folders::toggle_expansion(&mut self.notebook, id);
        self.commit(result)
    }

    pub fn create_note(&mut self, folder_id: &str) -> Result<CmdResult> {
        let result = commands::notes::create(&mut self.notebook, folder_id);
        self.commit(result)
    }

    pub fn delete_note(&mut self, folder_id: &str, note_id: &str) -> Result<CmdResult> {
        let result = commands::notes::delete(&mut self.notebook, folder_id, note_id);
        self.commit(result)
    }

    pub fn select_note(&mut self, folder_id: &str, note_id: &str) -> Result<CmdResult> {
        let result = commands::notes::select(&mut self.notebook, folder_id, note_id);
        self.commit(result)
    }

    pub fn save_current_note(&mut self, title: &str, content: &str) -> Result<CmdResult> {
        let result = commands::notes::save_current(&mut self.notebook, title, content);
        self.commit(result)
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.notebook.active_note()
    }

    /// Folder id for a user reference (id or case-insensitive name).
    pub fn resolve_folder(&self, reference: &str) -> Option<String> {
        commands::helpers::resolve_folder_ref(&self.notebook, reference)
    }

    /// Note id for a user reference (id or case-insensitive title) in a folder.
    pub fn resolve_note(&self, folder_id: &str, reference: &str) -> Option<String> {
        commands::helpers::resolve_note_ref(&self.notebook, folder_id, reference)
    }

    /// Put the active note's markup on the surface, or the empty placeholder
    /// when there is no active note.
    pub fn load_active_into(&self, surface: &mut dyn EditingSurface) {
        match self.active_note() {
            Some(note) if !note.content.is_empty() => surface.set_content(&note.content),
            _ => surface.set_content(EMPTY_NOTE_MARKUP),
        }
    }

    pub fn save_from_surface(
        &mut self,
        title: &str,
        surface: &dyn EditingSurface,
    ) -> Result<CmdResult> {
        let content = surface.content();
        self.save_current_note(title, &content)
    }

    /// Apply a formatting command on the surface, then save the active note
    /// with the surface's new markup.
    pub fn format_active_note(
        &mut self,
        surface: &mut dyn EditingSurface,
        command: &FormatCommand,
    ) -> Result<CmdResult> {
        let Some(title) = self.active_note().map(|n| n.title.clone()) else {
            return Ok(CmdResult::default());
        };
        surface.apply_format(command)?;
        self.save_from_surface(&title, surface)
    }

    pub fn export_data(&self) -> Result<String> {
        commands::transfer::export(&self.notebook)
    }

    /// Replace the whole notebook with `text`. On failure nothing changes and
    /// nothing is written.
    pub fn import_data(&mut self, text: &str) -> Result<CmdResult> {
        let notebook = commands::transfer::parse_import(text)?;
        let folders = notebook.folders.len();
        let notes = notebook.note_count();
        self.notebook = notebook;

        let mut result = CmdResult::changed();
        result.add_message(CmdMessage::success(format!(
            "Imported {} folders, {} notes",
            folders, notes
        )));
        self.commit(Ok(result))
    }

    pub fn export_document(&self, export_dir: &Path) -> Result<CmdResult> {
        commands::document::run(&self.notebook, export_dir)
    }

    pub fn archive(&self, export_dir: &Path) -> Result<CmdResult> {
        commands::archive::run(&self.notebook, export_dir)
    }

    fn commit(&mut self, result: Result<CmdResult>) -> Result<CmdResult> {
        let mut result = result?;
        self.persist(&mut result);
        Ok(result)
    }

    fn persist(&mut self, result: &mut CmdResult) {
        if !result.changed {
            return;
        }
        match self.save() {
            Ok(()) => log::debug!("saved notebook under {}", self.key),
            Err(e) => {
                log::warn!("Error saving notebook under {}: {}", self.key, e);
                result.add_message(CmdMessage::warning(format!(
                    "Changes kept in memory but not saved: {}",
                    e
                )));
            }
        }
    }

    fn save(&mut self) -> Result<()> {
        self.preserve_unreadable()?;
        let text = commands::transfer::export(&self.notebook)?;
        self.store.set(&self.key, &text)
    }

    /// Copy a value we failed to load to its backup key before it is first
    /// replaced. Fails, blocking the write, when the value cannot be read.
    fn preserve_unreadable(&mut self) -> Result<()> {
        if !self.unreadable {
            return Ok(());
        }
        if let Some(raw) = self.store.get(&self.key)? {
            let backup = backup_key(&self.key);
            self.store.set(&backup, &raw)?;
            log::warn!("Kept unreadable notebook under {} as {}", self.key, backup);
        }
        self.unreadable = false;
        Ok(())
    }
}

/// Key an unreadable value under `key` is copied to before it is replaced.
pub fn backup_key(key: &str) -> String {
    format!("{}.bak", key)
}

/// Read and parse the notebook under `key`. Nothing stored yields an empty
/// notebook; `None` means something is stored but could not be loaded.
fn load_notebook<S: KeyValueStore>(store: &S, key: &str) -> Option<Notebook> {
    let text = match store.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => {
            log::debug!("no notebook stored under {}", key);
            return Some(Notebook::default());
        }
        Err(e) => {
            log::warn!("Error loading notebook from {}: {}", key, e);
            return None;
        }
    };

    match commands::transfer::parse(&text) {
        Ok(notebook) => {
            log::debug!(
                "loaded {} folders, {} notes from {}",
                notebook.folders.len(),
                notebook.note_count(),
                key
            );
            Some(notebook)
        }
        Err(e) => {
            log::warn!("Stored notebook under {} is unreadable: {}", key, e);
            None
        }
    }
}
