use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuireError {
    #[error("Invalid folder name: {0}")]
    InvalidFolderName(String),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Export failed: {0}. Please try again.")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, QuireError>;
