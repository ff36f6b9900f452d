use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quire", bin_name = "quire", version)]
#[command(about = "Folders of rich-text notes, kept locally", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $QUIRE_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show folders and notes
    #[command(alias = "ls")]
    List {
        /// Show the notes of every folder, not only the expanded one
        #[arg(short, long)]
        all: bool,
    },

    /// Create, rename, delete or expand folders
    #[command(subcommand)]
    Folder(FolderCommands),

    /// Work with notes and the active note
    #[command(subcommand)]
    Note(NoteCommands),

    /// Print the whole notebook as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the whole notebook with an exported JSON file
    Import {
        /// File produced by `quire export`
        file: PathBuf,
    },

    /// Export the active note as a document
    Doc {
        /// Directory to write to (defaults to the configured export_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Archive every note as documents in a .tar.gz
    Archive {
        /// Directory to write to (defaults to the configured export_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Show or set configuration
    Config {
        /// Config key
        key: Option<String>,
        /// New value
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// Create a folder
    Create {
        /// Folder name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Rename a folder
    Rename {
        /// Folder id or name
        folder: String,
        /// New name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Delete a folder and all its notes
    Delete {
        /// Folder id or name
        folder: String,
    },

    /// Expand or collapse a folder
    Toggle {
        /// Folder id or name
        folder: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Create an untitled note in a folder and make it active
    Create {
        /// Folder id or name
        folder: String,
    },

    /// Delete a note
    Delete {
        /// Folder id or name
        folder: String,
        /// Note id or title
        note: String,
    },

    /// Make a note the active note
    Select {
        /// Folder id or name
        folder: String,
        /// Note id or title
        note: String,
    },

    /// Print the active note
    Show {
        /// Print plain text instead of markup
        #[arg(long)]
        plain: bool,
    },

    /// Set the active note's title and/or content
    Write {
        /// New title (keeps the current one if omitted)
        #[arg(short, long)]
        title: Option<String>,

        /// New content (keeps the current one if omitted)
        #[arg(short, long, conflicts_with = "stdin")]
        content: Option<String>,

        /// Read the content from stdin
        #[arg(long)]
        stdin: bool,

        /// Treat the content as Markdown and render it to markup
        #[arg(short, long)]
        markdown: bool,
    },

    /// Edit the active note in $EDITOR
    Edit,

    /// Toggle a format on the active note (bold, italic, underline, h1, h2, h3)
    Format {
        /// Format name
        format: String,
    },

    /// Color the active note's text
    Color {
        /// CSS color, e.g. "#f6bd60" or "red"
        value: String,
    },
}
