use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuireError, Result};
use crate::model::Notebook;
use chrono::{DateTime, Local};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use super::document::{render, slug};

/// Write every note, rendered as a document, into a `.tar.gz` in `export_dir`.
pub fn run(notebook: &Notebook, export_dir: &Path) -> Result<CmdResult> {
    if notebook.note_count() == 0 {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No notes to archive."));
        return Ok(res);
    }

    let now = Local::now();
    let filename = format!("quire-{}.tar.gz", now.format("%Y-%m-%d_%H-%M-%S"));
    let path = export_dir.join(filename);

    let export_err = |e: std::io::Error| {
        QuireError::Export(format!("could not write {}: {}", path.display(), e))
    };
    if !export_dir.exists() {
        fs::create_dir_all(export_dir).map_err(export_err)?;
    }
    let file = File::create(&path).map_err(export_err)?;
    discard_on_error(&path, write_archive(file, notebook, &now))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Archived {} notes to {}",
        notebook.note_count(),
        path.display()
    )));
    Ok(result.with_paths(vec![path]))
}

/// Entry path inside the archive for a note.
pub fn entry_name(folder_name: &str, note_title: &str, note_id: &str) -> String {
    let short_id = note_id
        .char_indices()
        .rev()
        .nth(7)
        .map(|(i, _)| &note_id[i..])
        .unwrap_or(note_id);
    format!("quire/{}/{}-{}.html", slug(folder_name), slug(note_title), short_id)
}

/// Remove a partly written output file when writing it failed.
fn discard_on_error(path: &Path, written: Result<()>) -> Result<()> {
    if written.is_err() {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Could not remove partial archive {}: {}", path.display(), e);
        }
    }
    written
}

fn write_archive<W: Write>(writer: W, notebook: &Notebook, now: &DateTime<Local>) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for folder in &notebook.folders {
        for note in &folder.notes {
            let document = render(note, now)?;

            let mut header = tar::Header::new_gnu();
            header.set_size(document.len() as u64);
            header.set_mode(0o644);
            header.set_mtime(now.timestamp().max(0) as u64);
            header.set_cksum();

            tar.append_data(
                &mut header,
                entry_name(&folder.name, &note.title, &note.id),
                document.as_bytes(),
            )
            .map_err(QuireError::Io)?;
        }
    }

    tar.into_inner()
        .and_then(|enc| enc.finish())
        .map_err(QuireError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{folders, notes};
    use flate2::read::GzDecoder;
    use tempfile::TempDir;

    #[test]
    fn entry_names_use_slugs_and_id_suffix() {
        assert_eq!(
            entry_name("Work Stuff", "Plan A", "n_0123456789abcdef"),
            "quire/work_stuff/plan_a-89abcdef.html"
        );
    }

    #[test]
    fn empty_notebook_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let result = run(&Notebook::default(), temp.path()).unwrap();
        assert!(result.paths.is_empty());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_write_removes_partial_archive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("quire-partial.tar.gz");
        fs::write(&path, b"half").unwrap();

        let failed = Err(QuireError::Io(std::io::Error::other("disk full")));
        assert!(discard_on_error(&path, failed).is_err());
        assert!(!path.exists());

        fs::write(&path, b"whole").unwrap();
        discard_on_error(&path, Ok(())).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn archives_every_note() {
        let temp = TempDir::new().unwrap();
        let mut nb = Notebook::default();
        folders::create(&mut nb, "Work").unwrap();
        folders::create(&mut nb, "Home").unwrap();
        let work = nb.folders[0].id.clone();
        let home = nb.folders[1].id.clone();
        notes::create(&mut nb, &work).unwrap();
        notes::save_current(&mut nb, "Plan", "<p>ship</p>").unwrap();
        notes::create(&mut nb, &home).unwrap();

        let result = run(&nb, temp.path()).unwrap();
        let file = File::open(&result.paths[0]).unwrap();
        let mut archive = tar::Archive::new(GzDecoder::new(file));
        let names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names.len(), 2);
        assert!(names[0].starts_with("quire/work/plan-"));
        assert!(names[1].starts_with("quire/home/untitled_note-"));
    }
}
