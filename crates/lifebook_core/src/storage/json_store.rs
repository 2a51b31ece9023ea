//! Generic JSON file adapter.
//!
//! # Responsibility
//! - Map one domain data type to one JSON file on disk.
//! - Translate filesystem and parse failures into the storage taxonomy.
//!
//! # Invariants
//! - An absent file reads as `Ok(None)`, never as an error.
//! - A parse or post-parse `verify` failure reads as `StorageError::Format`.

use super::{DomainData, StorageError, StorageResult};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// One JSON file holding one domain data value.
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DomainData> JsonStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and verifies the stored value.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn read(&self) -> StorageResult<Option<T>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        let value: T = serde_json::from_str(&text).map_err(|err| StorageError::Format {
            path: self.path.clone(),
            detail: err.to_string(),
        })?;
        value.verify().map_err(|detail| StorageError::Format {
            path: self.path.clone(),
            detail,
        })?;

        debug!(
            "event=store_read module=storage status=ok path={}",
            self.path.display()
        );
        Ok(Some(value))
    }

    /// Writes the value as pretty-printed JSON, creating parent directories.
    pub fn write(&self, value: &T) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StorageError::Io {
                    path: self.path.clone(),
                    source: err,
                })?;
            }
        }

        let text = serde_json::to_string_pretty(value).map_err(|err| StorageError::Format {
            path: self.path.clone(),
            detail: err.to_string(),
        })?;
        fs::write(&self.path, text).map_err(|err| StorageError::Io {
            path: self.path.clone(),
            source: err,
        })?;

        debug!(
            "event=store_write module=storage status=ok path={}",
            self.path.display()
        );
        Ok(())
    }
}
