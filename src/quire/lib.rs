//! # Quire Architecture
//!
//! Quire is a **UI-agnostic notebook library**: folders of rich-text notes,
//! a selection (active folder and note), and write-through persistence of
//! the whole tree under a single storage key. The `quire` binary is one
//! client of it; a GUI or web front end would be another.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - The notebook store: owns the Notebook and the backend    │
//! │  - Persists after every mutation                            │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure logic over &mut Notebook                            │
//! │  - Reports whether anything changed                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait: get(key) / set(key, text)           │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Editing
//!
//! Note bodies are opaque markup. Whatever produces them sits behind the
//! [`surface::EditingSurface`] trait; the store only reads and writes the
//! markup through it.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout/stderr or exits the
//! process. Storage problems are reported through the `log` facade and
//! warning messages, never by panicking.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): unit tests of the notebook logic on a
//!    plain `Notebook`. Most tests live here.
//! 2. **API** (`api.rs`): write-through behaviour and failure handling
//!    against `InMemoryStore`.
//! 3. **CLI** (`tests/`): the binary end to end, in a temporary data dir.
//!
//! ## Module Overview
//!
//! - [`api`]: The notebook store, entry point for all operations
//! - [`commands`]: Logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Notebook`, `Folder`, `Note`)
//! - [`surface`]: Editing surface abstraction and the in-process markup surface
//! - [`markup`]: Document sanitizing, Markdown input, previews
//! - [`templates`]: minijinja templates for exported documents
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod markup;
pub mod model;
pub mod store;
pub mod surface;
pub mod templates;
