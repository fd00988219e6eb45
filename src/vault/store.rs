//! Durable key-value storage for the encrypted blob.
//!
//! `FileStore` keeps one file per key under a directory, written via
//! temp-file + rename so readers never see a half-written blob and a
//! failed write leaves the previous one in place.  `MemoryStore` is a
//! shared in-memory map used when nothing should touch the disk.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::errors::{Result, VaultError};

/// Longest storage key we accept.
const MAX_KEY_LEN: usize = 128;

/// Durable key-value storage scoped to one user profile.
pub trait PersistentStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value wholesale.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`.  Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Validate that a storage key is safe to use as a file name.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty, must not start with a period, and at most 128
/// characters.
pub fn validate_storage_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(VaultError::InvalidStorageKey(
            "storage key cannot be empty".into(),
        ));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(VaultError::InvalidStorageKey(format!(
            "storage key cannot exceed {MAX_KEY_LEN} characters"
        )));
    }
    if key.starts_with('.') {
        return Err(VaultError::InvalidStorageKey(format!(
            "storage key '{key}' cannot start with a period"
        )));
    }
    if !key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(VaultError::InvalidStorageKey(format!(
            "storage key '{key}' contains invalid characters — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_storage_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// A temp path no other writer in this or another process will pick.
    fn temp_path_for(&self, key: &str) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!(".{key}.{}.{seq}.json.tmp", std::process::id()))
    }
}

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Create `path` exclusively and write `contents`.  On unix the file is
/// created 0600, so the blob is never readable by other users.
fn write_owner_only(path: &Path, contents: &str) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    let written = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    if let Err(e) = written {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(e.into());
    }
    Ok(())
}

impl PersistentStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // Atomic write: the temp file lives in the same directory so the
        // rename stays on one filesystem.
        let tmp_path = self.temp_path_for(key);
        write_owner_only(&tmp_path, value)?;

        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!(path = %path.display(), "blob written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "blob removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store.  Clones share the same map, so a second `Vault` built
/// over a clone sees what the first one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_storage_key(key)?;
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_storage_key(key)?;
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_storage_key(key)?;
        self.entries().remove(key);
        Ok(())
    }
}
