use colored::Colorize;
use quire::api::{CmdMessage, CmdResult, MessageLevel};
use quire::config::QuireConfig;
use quire::markup::plain_text;
use quire::model::{Note, Notebook};
use quire::surface::ToolbarState;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MIN_LINE_WIDTH: usize = 40;
const MAX_LINE_WIDTH: usize = 100;
const ACTIVE_MARKER: &str = "●";
const EXPANDED_MARKER: &str = "▾";
const COLLAPSED_MARKER: &str = "▸";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Ids of the folders and notes a command created or changed, so they can
/// be used as references in later commands.
pub(super) fn print_affected(result: &CmdResult) {
    for folder in &result.affected_folders {
        println!("  {} {}", folder.id.dimmed(), folder.name);
    }
    for note in &result.affected_notes {
        println!("  {} {}", note.id.dimmed(), note.title);
    }
}

/// Folder tree. Only the expanded (active) folder lists its notes unless
/// `all` is set.
pub(super) fn print_notebook(notebook: &Notebook, all: bool) {
    if notebook.folders.is_empty() {
        println!("No folders yet. Create one with `quire folder create <name>`.");
        return;
    }

    let width = line_width();
    for folder in &notebook.folders {
        let expanded = notebook.is_active_folder(&folder.id);
        let marker = if expanded {
            EXPANDED_MARKER
        } else {
            COLLAPSED_MARKER
        };
        let count = format!("({})", folder.notes.len());
        let name = if expanded {
            folder.name.bold()
        } else {
            folder.name.normal()
        };
        println!(
            "{} {} {}  {}",
            marker,
            name,
            count.dimmed(),
            folder.id.dimmed()
        );

        if !(expanded || all) {
            continue;
        }
        if folder.notes.is_empty() {
            println!("    {}", "(no notes)".dimmed());
        }
        for note in &folder.notes {
            print_note_line(note, notebook.is_active_note(&note.id), width);
        }
    }
}

fn print_note_line(note: &Note, active: bool, width: usize) {
    let prefix = if active {
        format!("  {} ", ACTIVE_MARKER)
    } else {
        "    ".to_string()
    };
    let available = width.saturating_sub(prefix.width());

    let title = truncate_to_width(&note.title, available);
    let remaining = available.saturating_sub(title.width() + 2);
    let preview = plain_text(&note.content);
    let preview = if preview.is_empty() || remaining < 4 {
        String::new()
    } else {
        format!("  {}", truncate_to_width(&preview, remaining))
    };

    let title = if active {
        title.green().bold()
    } else {
        title.normal()
    };
    println!("{}{}{}", prefix, title, preview.dimmed());
}

pub(super) fn print_note(note: &Note, plain: bool) {
    println!("{}", note.title.bold());
    println!("{}", "-".repeat(note.title.width().max(3)));
    if plain {
        println!("{}", plain_text(&note.content));
    } else {
        println!("{}", note.content);
    }
}

pub(super) fn print_toolbar(toolbar: &ToolbarState) {
    let buttons: Vec<String> = toolbar
        .buttons
        .iter()
        .map(|(format, active)| {
            let label = format.to_string();
            if *active {
                format!("[{}]", label).green().bold().to_string()
            } else {
                label.dimmed().to_string()
            }
        })
        .collect();
    println!("{}", buttons.join(" "));
}

pub(super) fn print_config(config: &QuireConfig) {
    for key in QuireConfig::KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key, value);
    }
}

fn line_width() -> usize {
    let (_, columns) = console::Term::stdout().size();
    (columns as usize).clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("Plan", 10), "Plan");
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate_to_width("Shopping list", 6), "Shopp…");
    }

    #[test]
    fn truncate_counts_wide_chars() {
        let cut = truncate_to_width("日本語のノート", 6);
        assert_eq!(cut, "日本…");
        assert!(cut.width() <= 6);
    }
}
