//! # Storage Layer
//!
//! The notebook is persisted as a single serialized record under one fixed
//! key. [`KeyValueStore`] is the whole contract between the notebook and its
//! storage: read a key, write a key.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - One file per key: `{data_dir}/{key}.json`
//!   - Writes go to a `.tmp` sibling first and are renamed into place
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate read and write failures
//!
//! ## Failure Semantics
//!
//! Backends report failures as errors. Deciding what a failure means is the
//! caller's job: the API treats an unreadable value as an empty notebook,
//! copying it to `<key>.bak` before it replaces it, and a failed write as a
//! logged warning, keeping its in-memory state.
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! ~/.local/share/quire/
//! ├── quire-data.json     # The notebook (folders, notes, selection)
//! └── config.json         # Configuration
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract interface for notebook persistence.
pub trait KeyValueStore {
    /// Read the text stored under `key`. `Ok(None)` if nothing was ever stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `text` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, text: &str) -> Result<()>;
}
