use super::KeyValueStore;
use crate::error::{QuireError, Result};
use std::fs;
use std::path::PathBuf;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Path of the file backing `key`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(QuireError::Io)?;
        }
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains(&['/', '\\'][..]) || key.starts_with('.') {
        return Err(QuireError::Store(format!("Invalid storage key: {:?}", key)));
    }
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path).map_err(QuireError::Io)?;
        Ok(Some(text))
    }

    fn set(&mut self, key: &str, text: &str) -> Result<()> {
        validate_key(key)?;
        self.ensure_dir()?;

        let path = self.key_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, text).map_err(QuireError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(QuireError::Io(e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_key_reads_as_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().to_path_buf());
        assert_eq!(store.get("quire-data").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("nested"));
        store.set("quire-data", "{\"folders\":[]}").unwrap();
        assert_eq!(
            store.get("quire-data").unwrap().as_deref(),
            Some("{\"folders\":[]}")
        );
        assert!(temp.path().join("nested").join("quire-data.json").exists());
    }

    #[test]
    fn set_leaves_no_tmp_files() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().to_path_buf());
        store.set("quire-data", "one").unwrap();
        store.set("quire-data", "two").unwrap();

        for entry in fs::read_dir(temp.path()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
        assert_eq!(store.get("quire-data").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn directory_at_key_path_fails_both_ways() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().to_path_buf());
        fs::create_dir_all(store.key_path("quire-data")).unwrap();

        assert!(store.get("quire-data").is_err());
        assert!(store.set("quire-data", "{\"folders\":[]}").is_err());

        assert!(store.key_path("quire-data").is_dir());
        for entry in fs::read_dir(temp.path()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn rejects_keys_that_escape_the_root() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().to_path_buf());
        assert!(store.set("../outside", "x").is_err());
        assert!(store.get("").is_err());
    }
}
