//! Storage layer: the persisted path -> filetype mapping.
//!
//! A single JSON object in one file, rewritten in full on every save.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Canonical absolute path -> filetype name. Values are never empty.
pub type Mapping = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("cannot serialize mapping: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("cannot create directory {dir}: {source}")]
    CreateDir { dir: PathBuf, source: io::Error },
}

#[derive(Debug, Clone)]
pub struct MappingStore {
    path: PathBuf,
}

impl MappingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file that receives the raw content of a corrupted store.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".backup");
        PathBuf::from(name)
    }

    /// Create the parent directory chain of the backing file.
    pub fn ensure_directory(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                    dir: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        Ok(())
    }

    /// Read the mapping. An absent file is an empty mapping; a structurally
    /// invalid file is quarantined to `backup_path()` and also yields an
    /// empty mapping. Only genuine read failures surface as errors.
    pub fn load(&self) -> Result<Mapping, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Mapping::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        match decode(&raw) {
            Some(mapping) => Ok(mapping),
            None => {
                self.quarantine(&raw);
                Ok(Mapping::new())
            }
        }
    }

    /// Serialize and overwrite the backing file in full.
    pub fn save(&self, mapping: &Mapping) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(mapping).map_err(StoreError::Serialize)?;
        fs::write(&self.path, text).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn quarantine(&self, raw: &str) {
        let backup = self.backup_path();
        match fs::write(&backup, raw) {
            Ok(()) => warn!(
                file = %self.path.display(),
                backup = %backup.display(),
                "mapping file is corrupted; raw content moved aside, starting empty"
            ),
            Err(e) => warn!(
                file = %self.path.display(),
                error = %e,
                "mapping file is corrupted and the backup copy failed; starting empty"
            ),
        }
    }
}

fn decode(raw: &str) -> Option<Mapping> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;
    let mut mapping = Mapping::new();
    for (path, filetype) in object {
        let filetype = filetype.as_str()?;
        // Empty values violate the store invariant; drop them rather than
        // rejecting an otherwise valid file.
        if filetype.is_empty() {
            continue;
        }
        mapping.insert(path.clone(), filetype.to_string());
    }
    Some(mapping)
}
