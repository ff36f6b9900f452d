//! # CLI Layer
//!
//! One client of the quire library. This is the only place that knows
//! about terminal I/O, argument parsing and exit codes.
//!
//! - `run()`: parses arguments, sets up logging and dispatches
//! - `init_context()`: resolves the data dir and opens the notebook store
//! - `handle_*()`: one per command; calls the API and prints the result
//!
//! Folders are referenced by id or name, notes by id or title. A reference
//! that matches nothing is an error here, even though the store itself
//! treats unknown ids as no-ops.

use super::args::{Cli, Commands, FolderCommands, NoteCommands};
use super::print::{
    print_affected, print_config, print_messages, print_note, print_notebook, print_toolbar,
};
use clap::Parser;
use directories::ProjectDirs;
use quire::api::{CmdResult, ConfigAction, QuireApi};
use quire::commands;
use quire::config::QuireConfig;
use quire::editor::{edit_content, EditorContent};
use quire::error::{QuireError, Result};
use quire::markup::markdown_to_markup;
use quire::model::Note;
use quire::store::fs::FileStore;
use quire::surface::{FormatCommand, InlineFormat, MarkupSurface, ToolbarState};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

const HOME_ENV: &str = "QUIRE_HOME";

struct AppContext {
    api: QuireApi<FileStore>,
    data_dir: PathBuf,
    config: QuireConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir)?;

    match cli.command {
        // Config must be editable without opening (and seeding) the notebook.
        Some(Commands::Config { key, value }) => handle_config(&data_dir, key, value),
        command => {
            let mut ctx = init_context(data_dir)?;
            dispatch(&mut ctx, command.unwrap_or(Commands::List { all: false }))
        }
    }
}

fn dispatch(ctx: &mut AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::List { all } => handle_list(ctx, all),
        Commands::Folder(action) => handle_folder(ctx, action),
        Commands::Note(action) => handle_note(ctx, action),
        Commands::Export { output } => handle_export(ctx, output),
        Commands::Import { file } => handle_import(ctx, &file),
        Commands::Doc { output_dir } => handle_doc(ctx, output_dir),
        Commands::Archive { output_dir } => handle_archive(ctx, output_dir),
        Commands::Config { key, value } => handle_config(&ctx.data_dir, key, value),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// `--data-dir`, then `$QUIRE_HOME`, then the platform data directory.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "quire", "quire")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            QuireError::Store(format!(
                "Could not determine a data directory. Set ${} or pass --data-dir.",
                HOME_ENV
            ))
        })
}

fn init_context(data_dir: PathBuf) -> Result<AppContext> {
    let config = QuireConfig::load(&data_dir)?;

    let store = FileStore::new(data_dir.clone());
    log::debug!(
        "notebook file: {}",
        store.key_path(&config.storage_key).display()
    );
    let api = QuireApi::open(store, &config);

    Ok(AppContext {
        api,
        data_dir,
        config,
    })
}

fn handle_list(ctx: &AppContext, all: bool) -> Result<()> {
    print_notebook(ctx.api.notebook(), all);
    Ok(())
}

fn handle_folder(ctx: &mut AppContext, action: FolderCommands) -> Result<()> {
    let result = match action {
        FolderCommands::Create { name } => {
            let name = name.join(" ");
            let result = ctx.api.create_folder(&name)?;
            if !result.changed {
                return Err(QuireError::InvalidFolderName(
                    "Folder name cannot be empty".to_string(),
                ));
            }
            result
        }
        FolderCommands::Rename { folder, name } => {
            let id = folder_id(ctx, &folder)?;
            ctx.api.rename_folder(&id, &name.join(" "))?
        }
        FolderCommands::Delete { folder } => {
            let id = folder_id(ctx, &folder)?;
            ctx.api.delete_folder(&id)?
        }
        FolderCommands::Toggle { folder } => {
            let id = folder_id(ctx, &folder)?;
            let result = ctx.api.toggle_folder_expansion(&id)?;
            print_notebook(ctx.api.notebook(), false);
            result
        }
    };
    print_messages(&result.messages);
    print_affected(&result);
    Ok(())
}

fn handle_note(ctx: &mut AppContext, action: NoteCommands) -> Result<()> {
    match action {
        NoteCommands::Create { folder } => {
            let id = folder_id(ctx, &folder)?;
            let result = ctx.api.create_note(&id)?;
            print_messages(&result.messages);
            print_affected(&result);
            Ok(())
        }
        NoteCommands::Delete { folder, note } => {
            let (folder_id, note_id) = note_ids(ctx, &folder, &note)?;
            let result = ctx.api.delete_note(&folder_id, &note_id)?;
            print_messages(&result.messages);
            Ok(())
        }
        NoteCommands::Select { folder, note } => {
            let (folder_id, note_id) = note_ids(ctx, &folder, &note)?;
            ctx.api.select_note(&folder_id, &note_id)?;
            if let Some(note) = ctx.api.active_note() {
                print_note(note, true);
            }
            Ok(())
        }
        NoteCommands::Show { plain } => {
            let note = active_note(ctx)?;
            print_note(note, plain);
            Ok(())
        }
        NoteCommands::Write {
            title,
            content,
            stdin,
            markdown,
        } => handle_write(ctx, title, content, stdin, markdown),
        NoteCommands::Edit => handle_edit(ctx),
        NoteCommands::Format { format } => {
            let format: InlineFormat = format.parse()?;
            handle_format(ctx, FormatCommand::Toggle(format))
        }
        NoteCommands::Color { value } => handle_format(ctx, FormatCommand::Color(value)),
    }
}

fn handle_write(
    ctx: &mut AppContext,
    title: Option<String>,
    content: Option<String>,
    stdin: bool,
    markdown: bool,
) -> Result<()> {
    let current = active_note(ctx)?.clone();

    let content = match content {
        Some(content) => Some(content),
        None if stdin => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };
    let content = match content {
        Some(text) if markdown => markdown_to_markup(&text),
        Some(text) => text,
        None => current.content.clone(),
    };
    let title = title.unwrap_or(current.title);

    let result = ctx.api.save_current_note(&title, &content)?;
    report_save(&result);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext) -> Result<()> {
    let current = active_note(ctx)?;
    let initial = EditorContent::new(current.title.clone(), current.content.clone());

    let edited = edit_content(&initial)?;
    if edited == initial {
        println!("No changes.");
        return Ok(());
    }

    let result = ctx.api.save_current_note(&edited.title, &edited.content)?;
    report_save(&result);
    Ok(())
}

/// Apply a formatting command to the whole body of the active note and show
/// the toolbar state that results.
fn handle_format(ctx: &mut AppContext, command: FormatCommand) -> Result<()> {
    active_note(ctx)?;

    let mut surface = MarkupSurface::new("");
    ctx.api.load_active_into(&mut surface);
    surface.select_contents();

    let result = ctx.api.format_active_note(&mut surface, &command)?;
    print_messages(&result.messages);
    print_toolbar(&ToolbarState::from_surface(&surface));
    Ok(())
}

fn handle_export(ctx: &AppContext, output: Option<PathBuf>) -> Result<()> {
    let text = ctx.api.export_data()?;
    match output {
        Some(path) => {
            fs::write(&path, text).map_err(|e| {
                QuireError::Export(format!("could not write {}: {}", path.display(), e))
            })?;
            println!("Exported notebook to {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .map_err(|e| QuireError::Import(format!("could not read {}: {}", file.display(), e)))?;
    let result = ctx.api.import_data(&text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_doc(ctx: &AppContext, output_dir: Option<PathBuf>) -> Result<()> {
    let dir = output_dir.unwrap_or_else(|| ctx.config.export_dir());
    let result = ctx.api.export_document(&dir)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_archive(ctx: &AppContext, output_dir: Option<PathBuf>) -> Result<()> {
    let dir = output_dir.unwrap_or_else(|| ctx.config.export_dir());
    let result = ctx.api.archive(&dir)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(data_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = commands::config::run(data_dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn report_save(result: &CmdResult) {
    if result.changed {
        print_messages(&result.messages);
    } else {
        println!("No changes.");
    }
}

fn folder_id(ctx: &AppContext, reference: &str) -> Result<String> {
    ctx.api
        .resolve_folder(reference)
        .ok_or_else(|| QuireError::Api(format!("Folder not found: {}", reference)))
}

fn note_ids(ctx: &AppContext, folder: &str, note: &str) -> Result<(String, String)> {
    let folder_id = folder_id(ctx, folder)?;
    let note_id = ctx
        .api
        .resolve_note(&folder_id, note)
        .ok_or_else(|| QuireError::Api(format!("Note not found: {}", note)))?;
    Ok((folder_id, note_id))
}

fn active_note(ctx: &AppContext) -> Result<&Note> {
    ctx.api.active_note().ok_or_else(|| {
        QuireError::Api("No note selected. Use `quire note select <folder> <note>`.".to_string())
    })
}
