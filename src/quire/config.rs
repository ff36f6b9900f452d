use crate::error::{QuireError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_STORAGE_KEY: &str = "quire-data";

/// Configuration for quire, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuireConfig {
    /// Key the notebook is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Seed a sample folder and note when the notebook is empty
    #[serde(default = "default_seed_sample")]
    pub seed_sample: bool,

    /// Where `doc` and `archive` write their files (defaults to the current dir)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_seed_sample() -> bool {
    true
}

impl Default for QuireConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            seed_sample: default_seed_sample(),
            export_dir: None,
        }
    }
}

impl QuireConfig {
    pub const KEYS: &'static [&'static str] = &["storage_key", "seed_sample", "export_dir"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(QuireError::Io)?;
        let config: QuireConfig =
            serde_json::from_str(&content).map_err(QuireError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(QuireError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(QuireError::Serialization)?;
        fs::write(config_path, content).map_err(QuireError::Io)?;
        Ok(())
    }

    /// Display value for a config key, `None` for unknown keys
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage_key" => Some(self.storage_key.clone()),
            "seed_sample" => Some(self.seed_sample.to_string()),
            "export_dir" => Some(
                self.export_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| ".".to_string()),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "storage_key" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("storage_key cannot be empty".to_string());
                }
                if value.contains(&['/', '\\'][..]) {
                    return Err("storage_key cannot contain path separators".to_string());
                }
                if value.starts_with('.') || format!("{}.json", value) == CONFIG_FILENAME {
                    return Err(format!("storage_key cannot be {}", value));
                }
                self.storage_key = value.to_string();
            }
            "seed_sample" => {
                self.seed_sample = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => return Err(format!("Invalid boolean for seed_sample: {}", other)),
                };
            }
            "export_dir" => {
                self.export_dir = if value.is_empty() || value == "." {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = QuireConfig::default();
        assert_eq!(config.storage_key, "quire-data");
        assert!(config.seed_sample);
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_set_seed_sample() {
        let mut config = QuireConfig::default();
        config.set("seed_sample", "off").unwrap();
        assert!(!config.seed_sample);
        assert!(config.set("seed_sample", "maybe").is_err());
    }

    #[test]
    fn test_set_storage_key_rejects_paths() {
        let mut config = QuireConfig::default();
        assert!(config.set("storage_key", "../escape").is_err());
        assert!(config.set("storage_key", "  ").is_err());
        config.set("storage_key", "work-notes").unwrap();
        assert_eq!(config.get("storage_key").as_deref(), Some("work-notes"));
    }

    #[test]
    fn test_unknown_key() {
        let mut config = QuireConfig::default();
        assert!(config.get("nope").is_none());
        assert!(config.set("nope", "1").is_err());
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = QuireConfig::load(temp.path().join("absent")).unwrap();
        assert_eq!(config, QuireConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();

        let mut config = QuireConfig::default();
        config.set("export_dir", "/tmp/quire-docs").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = QuireConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.export_dir(), PathBuf::from("/tmp/quire-docs"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.json"), r#"{"seed_sample": false}"#).unwrap();

        let loaded = QuireConfig::load(temp.path()).unwrap();
        assert!(!loaded.seed_sample);
        assert_eq!(loaded.storage_key, DEFAULT_STORAGE_KEY);
    }
}
