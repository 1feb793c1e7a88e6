//! Snapshot storage backends.
//!
//! The store persists its full state as a single snapshot; a backend only
//! needs to load and save raw bytes. Injecting the backend keeps the store
//! testable without touching the real filesystem.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Where the serialized snapshot lives.
pub trait StorageBackend {
    /// Loads the snapshot. Returns `Ok(None)` if none has been saved yet.
    fn load(&self) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the snapshot with `bytes`.
    fn save(&self, bytes: &[u8]) -> Result<(), StorageError>;
}

/// Stores the snapshot as a single file on disk.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StorageBackend for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(self.path.clone(), e)),
        }
    }

    fn save(&self, bytes: &[u8]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io(parent.to_path_buf(), e))?;
        }

        fs::write(&self.path, bytes).map_err(|e| StorageError::Io(self.path.clone(), e))
    }
}

/// In-memory backend used as a test double.
///
/// Clones share the same underlying cell, so a test can keep a handle to
/// the snapshot after handing the backend to a store. `set_fail_saves`
/// simulates a full or broken storage medium.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStorage {
    data: std::rc::Rc<std::cell::RefCell<Option<Vec<u8>>>>,
    fail_saves: std::rc::Rc<std::cell::Cell<bool>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(bytes: Vec<u8>) -> Self {
        let storage = Self::new();
        *storage.data.borrow_mut() = Some(bytes);
        storage
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

#[cfg(test)]
impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.data.borrow().clone())
    }

    fn save(&self, bytes: &[u8]) -> Result<(), StorageError> {
        if self.fail_saves.get() {
            return Err(StorageError::WriteFailed("storage is full".to_string()));
        }
        *self.data.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }
}

/// Errors that can occur reading or writing a snapshot.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing a file.
    Io(PathBuf, io::Error),
    /// The backend refused the write.
    WriteFailed(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StorageError::WriteFailed(e) => write!(f, "Write failed: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(_, e) => Some(e),
            StorageError::WriteFailed(_) => None,
        }
    }
}
