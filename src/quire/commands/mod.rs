use crate::config::QuireConfig;
use crate::model::{Folder, Note};
use std::path::PathBuf;

pub mod archive;
pub mod config;
pub mod document;
pub mod folders;
pub mod helpers;
pub mod notes;
pub mod seed;
pub mod transfer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Outcome of a command.
///
/// `changed` tells the API layer whether the notebook was mutated and
/// therefore has to be written back.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub changed: bool,
    pub affected_folders: Vec<Folder>,
    pub affected_notes: Vec<Note>,
    pub paths: Vec<PathBuf>,
    pub config: Option<QuireConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_folders(mut self, folders: Vec<Folder>) -> Self {
        self.affected_folders = folders;
        self
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: QuireConfig) -> Self {
        self.config = Some(config);
        self
    }
}
