//! JSON-file key-value store.
//!
//! Persists a [`StoreFile`] document at `<home>/.formwork/storage.json`.
//! Every mutation rewrites the whole document: serialize → `storage.json.tmp`
//! → `chmod 0600` → `rename`. The `.tmp` sibling lives in the same directory
//! as the target, so the rename never crosses filesystems.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use formwork_core::KeyValueStore;

use crate::error::{io_err, StoreError};

/// On-disk store payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreFile {
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            updated_at: Utc::now(),
            entries: BTreeMap::new(),
        }
    }
}

/// `<home>/.formwork/storage.json`: pure, no I/O.
pub fn store_path_at(home: &Path) -> PathBuf {
    home.join(".formwork").join("storage.json")
}

/// Write-through key-value store backed by one JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    file: StoreFile,
}

impl JsonFileStore {
    /// Open the store rooted at `home`. A missing file is an empty store;
    /// nothing is written until the first mutation.
    pub fn open_at(home: &Path) -> Result<Self, StoreError> {
        Self::open_path(store_path_at(home))
    }

    /// `open_at` convenience wrapper: uses `dirs::home_dir()`.
    pub fn open() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::HomeNotFound)?;
        Self::open_at(&home)
    }

    /// Open a store document at an explicit path.
    pub fn open_path(path: PathBuf) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::debug!("no store at {}, starting empty", path.display());
            return Ok(Self {
                path,
                file: StoreFile::default(),
            });
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let file = serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
            path: path.clone(),
            source: e,
        })?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.file.updated_at
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.file.entries
    }

    fn save(&mut self) -> Result<(), StoreError> {
        let Some(dir) = self.path.parent() else {
            return Err(io_err(
                &self.path,
                std::io::Error::other("invalid store path"),
            ));
        };
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
            set_dir_permissions(dir)?;
        }

        self.file.updated_at = Utc::now();
        let json = serde_json::to_string_pretty(&self.file)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
        set_file_permissions(&tmp)?;
        std::fs::rename(&tmp, &self.path).map_err(|e| io_err(&self.path, e))?;
        tracing::debug!("wrote store: {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.file.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.file.entries.get(key).map(String::as_str) == Some(value) && self.path.exists() {
            tracing::debug!("unchanged: {key}");
            return Ok(());
        }
        self.file.entries.insert(key.to_owned(), value.to_owned());
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        if self.file.entries.remove(key).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}
