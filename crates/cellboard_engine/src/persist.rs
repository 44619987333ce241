use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use cellboard_logging::{board_debug, board_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::StorageKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    #[error("storage directory missing or not writable: {0}")]
    StorageDir(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("malformed storage file {path}: {message}")]
    Format { path: String, message: String },
    #[error("invalid storage key {0}")]
    InvalidKey(String),
}

impl From<io::Error> for PersistError {
    fn from(err: io::Error) -> Self {
        PersistError::Io(err.to_string())
    }
}

/// Ensure storage directory exists; create if missing.
pub fn ensure_storage_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::StorageDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::StorageDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::StorageDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_storage_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target)
            .map_err(|e| PersistError::Io(e.error.to_string()))?;
        Ok(target)
    }
}

/// Durable string key-value storage addressed by root namespace and child key.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &StorageKey) -> Result<Option<String>, PersistError>;
    fn set_item(&self, key: &StorageKey, value: &str) -> Result<(), PersistError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RootFile {
    entries: BTreeMap<String, String>,
}

/// One RON file per root key, `{dir}/{root}.ron`, holding every child value.
pub struct FileKeyValueStore {
    dir: PathBuf,
    writer: AtomicFileWriter,
    // Serializes read-modify-write cycles on the same files.
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir.clone()),
            dir,
            lock: Mutex::new(()),
        }
    }

    fn file_name(root: &str) -> Result<String, PersistError> {
        let valid = !root.is_empty()
            && root
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PersistError::InvalidKey(root.to_string()));
        }
        Ok(format!("{root}.ron"))
    }

    fn read_root(&self, root: &str) -> Result<RootFile, PersistError> {
        let path = self.dir.join(Self::file_name(root)?);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(RootFile::default());
            }
            Err(err) => return Err(err.into()),
        };
        ron::from_str(&content).map_err(|err| PersistError::Format {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    fn write_root(&self, root: &str, file: &RootFile) -> Result<(), PersistError> {
        let file_name = Self::file_name(root)?;
        let pretty = ron::ser::PrettyConfig::new();
        let content =
            ron::ser::to_string_pretty(file, pretty).map_err(|err| PersistError::Format {
                path: self.dir.join(&file_name).display().to_string(),
                message: err.to_string(),
            })?;
        let path = self.writer.write(&file_name, &content)?;
        board_debug!("Wrote storage root {:?} to {:?}", root, path);
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &StorageKey) -> Result<Option<String>, PersistError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let file = self.read_root(&key.root)?;
        Ok(file.entries.get(&key.child).cloned())
    }

    fn set_item(&self, key: &StorageKey, value: &str) -> Result<(), PersistError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = match self.read_root(&key.root) {
            Ok(file) => file,
            // An unreadable root is replaced rather than blocking every later write.
            Err(PersistError::Format { path, message }) => {
                board_warn!("Discarding malformed storage file {}: {}", path, message);
                RootFile::default()
            }
            Err(err) => return Err(err),
        };
        file.entries.insert(key.child.clone(), value.to_string());
        self.write_root(&key.root, &file)
    }
}
