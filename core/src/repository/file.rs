use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::repository::traits::KeyValueStore;

const DEFAULT_FILE_NAME: &str = "storage.json";
const DEFAULT_DIR_NAME: &str = ".wellness";

/// Resolves the data directory: the given one, or `~/.wellness`.
pub fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    match base_dir {
        Some(dir) => Ok(dir),
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            Ok(home_dir.join(DEFAULT_DIR_NAME))
        }
    }
}

/// Key-value store kept as one JSON object in `<data dir>/storage.json`.
#[derive(Clone, Debug)]
pub struct FileKeyValueStore {
    file_path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = data_dir(base_dir)?;
        fs::create_dir_all(&path)
            .with_context(|| format!("Could not create data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &BTreeMap::<String, String>::new())?;
            writer.flush()?;
        }

        Ok(FileKeyValueStore { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let entries = serde_json::from_reader(reader)
            .with_context(|| format!("Corrupt store file {}", self.file_path.display()))?;
        Ok(entries)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        // Write next to the target and rename so a crash never leaves half a file.
        let tmp_path = self.file_path.with_extension("json.tmp");
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush()?;
        fs::rename(&tmp_path, &self.file_path)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read_entries()?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("Discarding unreadable store file: {:#}", err);
                BTreeMap::new()
            }
        };
        entries.insert(key.to_string(), value);
        self.write_entries(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_creates_empty_store() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.get("@marks").unwrap(), None);
    }

    #[test]
    fn test_values_survive_a_new_instance() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(Some(dir.path().to_path_buf())).unwrap();
        store.set("@marks", "{\"1\":\"#FF6666\"}".to_string()).unwrap();
        store.set("other", "x".to_string()).unwrap();

        let reopened = FileKeyValueStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(
            reopened.get("@marks").unwrap().as_deref(),
            Some("{\"1\":\"#FF6666\"}")
        );
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_set_overwrites() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(Some(dir.path().to_path_buf())).unwrap();
        store.set("k", "a".to_string()).unwrap();
        store.set("k", "b".to_string()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_corrupt_file_fails_read_but_not_write() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(store.path(), "not json").unwrap();

        assert!(store.get("k").is_err());
        store.set("k", "v".to_string()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
