use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use tempfile::NamedTempFile;

use crate::config::store_filename;

/// Minimal key/value persistence the history cache writes through.
/// Blobs are opaque text; every `set` replaces the previous blob wholesale.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, blob: &str) -> Result<()>;
    /// Removing a key that does not exist is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

/// In-process store. Clones share the same map, so two caches built over
/// clones of one `MemoryStore` see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, blob: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// One file per key under a directory, e.g. `.labseq/labseq-history.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(store_filename(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("Failed to read store file: {}", path.display())),
        }
    }

    fn set(&self, key: &str, blob: &str) -> Result<()> {
        fs::create_dir_all(&self.directory).context(format!(
            "Failed to create directory: {}",
            self.directory.display()
        ))?;
        let path = self.path_for(key);

        // Write beside the target then rename over it, so a crash mid-write
        // leaves the previous blob intact
        let mut tmp = NamedTempFile::new_in(&self.directory).context(format!(
            "Failed to create temporary file in: {}",
            self.directory.display()
        ))?;
        tmp.write_all(blob.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .context(format!("Failed to write store file: {}", path.display()))?;
        tmp.persist(&path)
            .context(format!("Failed to replace store file: {}", path.display()))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context(format!("Failed to delete store file: {}", path.display())),
        }
    }
}
