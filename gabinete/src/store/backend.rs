//! Key/value persistence media behind the task store.
//!
//! [`Storage`] is the seam: [`MemoryStorage`] backs tests and `--in-memory`
//! sessions, [`FileStorage`] keeps one JSON file per key on disk.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::StoreError;

/// A durable string-valued key/value medium.
///
/// Implementations must make `write` all-or-nothing: after a failed write a
/// subsequent `read` returns either the old value or the new one, never a
/// mix.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the medium is unavailable or unreadable.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the value could not be persisted.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }
}

/// In-memory implementation of [`Storage`].
///
/// Not persistent: all data is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new, empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored text for `key`, bypassing any decoding.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    /// Store raw text under `key` (used to plant corrupted values in tests).
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values.lock().insert(key.to_string(), value.to_string());
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.insert_raw(key, value);
        Ok(())
    }
}

/// File-backed implementation of [`Storage`].
///
/// Each key maps to `<dir>/<key>.json`. Writes go through a temporary file
/// that is fsynced and renamed over the target.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File path holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] unless the key is a non-empty run
    /// of ASCII letters, digits, `.`, `_` or `-` that does not start with a
    /// dot.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed(format!("{}: {e}", path.display()))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", self.dir.display())))?;

        let tmp_path = path.with_extension("json.tmp");
        if let Err(e) = write_synced(&tmp_path, value).and_then(|()| fs::rename(&tmp_path, &path))
        {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::WriteFailed(format!("{}: {e}", path.display())));
        }

        // Best effort: make the rename itself durable.
        if let Ok(dir) = fs::File::open(&self.dir) {
            let _ = dir.sync_all();
        }
        Ok(())
    }
}

fn write_synced(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}
