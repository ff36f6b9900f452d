use super::KeyValueStore;
use crate::error::{QuireError, Result};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    values: HashMap<String, String>,
    writes: usize,
    simulate_read_error: bool,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&mut self, simulate: bool) {
        self.simulate_read_error = simulate;
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Raw value under `key`, bypassing error simulation.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error {
            return Err(QuireError::Store("Simulated read error".to_string()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, text: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(QuireError::Store("Simulated write error".to_string()));
        }
        self.values.insert(key.to_string(), text.to_string());
        self.writes += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::config::DEFAULT_STORAGE_KEY;
    use crate::model::{Folder, Note, Notebook};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_raw(mut self, text: &str) -> Self {
            self.store.set(DEFAULT_STORAGE_KEY, text).unwrap();
            self.store.writes = 0;
            self
        }

        pub fn with_notebook(self, notebook: &Notebook) -> Self {
            let text = serde_json::to_string(notebook).unwrap();
            self.with_raw(&text)
        }

        /// `folders` folders named "Folder N", each holding `notes` notes.
        pub fn with_folders(self, folders: usize, notes: usize) -> Self {
            let mut notebook = Notebook::default();
            for f in 0..folders {
                let mut folder = Folder::new(format!("f_{}", f + 1), format!("Folder {}", f + 1));
                for n in 0..notes {
                    let mut note = Note::new(format!("n_{}_{}", f + 1, n + 1));
                    note.title = format!("Note {}", n + 1);
                    note.content = format!("<p>Content for note {}</p>", n + 1);
                    folder.notes.push(note);
                }
                notebook.folders.push(folder);
            }
            self.with_notebook(&notebook)
        }
    }
}
