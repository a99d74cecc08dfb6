//! On-disk render cache.
//!
//! Each key is stored as `<dir>/<sha256(key)>.json` holding a [`CacheEntry`].
//! Writes go to a uniquely named temp file in the same directory and are
//! persisted over the entry, so a reader never observes a half-written entry
//! and concurrent writers of one key never collide (last write wins).

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use reactrender_core::{RenderCache, RenderError, RenderResult};

use crate::error::{io_err, CacheError};

/// On-disk cache payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub stored_at: DateTime<Utc>,
    pub result: RenderResult,
}

/// Directory-backed [`RenderCache`].
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Cache rooted at `dir`; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileCache { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry file for `key` — pure, no I/O.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    /// Read the full entry for `key`, including its timestamp.
    pub fn load_entry(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let entry: CacheEntry = serde_json::from_str(&contents).map_err(|source| CacheError::Json {
            path: path.clone(),
            source,
        })?;
        if entry.key != key {
            return Err(CacheError::KeyMismatch {
                path,
                found: entry.key,
            });
        }
        Ok(Some(entry))
    }

    /// Write `result` under `key` atomically.
    pub fn store_entry(&self, key: &str, result: &RenderResult) -> Result<PathBuf, CacheError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;

        let path = self.entry_path(key);
        let entry = CacheEntry {
            key: key.to_owned(),
            stored_at: Utc::now(),
            result: result.clone(),
        };
        let json = serde_json::to_string_pretty(&entry).map_err(|source| CacheError::Json {
            path: path.clone(),
            source,
        })?;
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| io_err(&self.dir, e))?;
        let tmp_path = tmp.path().to_path_buf();
        tmp.as_file_mut()
            .write_all(json.as_bytes())
            .map_err(|e| io_err(&tmp_path, e))?;
        tmp.persist(&path).map_err(|e| io_err(&path, e.error))?;
        Ok(path)
    }

    /// Remove the entry for `key`; returns whether one existed.
    pub fn remove(&self, key: &str) -> Result<bool, CacheError> {
        let path = self.entry_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_err(&path, e)),
        }
    }
}

impl RenderCache for FileCache {
    fn get(&self, key: &str) -> Result<Option<RenderResult>, RenderError> {
        let entry = self.load_entry(key).map_err(|e| e.into_render(key))?;
        Ok(entry.map(|entry| entry.result))
    }

    fn set(&self, key: &str, value: &RenderResult) -> Result<(), RenderError> {
        let path = self.store_entry(key, value).map_err(|e| e.into_render(key))?;
        tracing::debug!(key, path = %path.display(), "stored render cache entry");
        Ok(())
    }
}
