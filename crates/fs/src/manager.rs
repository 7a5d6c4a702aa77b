//! Thin file-manager surface over the directory cache.
//!
//! Writes and deletes go through here so the base directory snapshot stays in
//! sync with disk without rescanning.

use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Component, Path, PathBuf},
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use dircache_runtime::{BASE_DIR_KEY, default_base_path};
use log::{debug, warn};

use crate::{
    cache::DirectoryCache,
    entry::TypeFilter,
    error::CacheError,
    names::entry_matches_extension,
    probe::ProbeStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Read,
    /// Create or truncate.
    Write,
    /// Create or append.
    Append,
}

/// Returned by a listing callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListControl {
    Continue,
    /// Stop listing; the entry was what the caller wanted.
    Match,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    NoMatch,
    Match,
}

pub struct FileManager {
    cache: Mutex<DirectoryCache>,
}

impl FileManager {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            cache: Mutex::new(DirectoryCache::new(base)),
        }
    }

    pub fn with_probe(base: impl Into<PathBuf>, status: ProbeStatus) -> Self {
        Self {
            cache: Mutex::new(DirectoryCache::with_probe(base, status)),
        }
    }

    /// Process-wide manager rooted at [`default_base_path`].
    pub fn global() -> &'static FileManager {
        static MANAGER: OnceLock<FileManager> = OnceLock::new();
        MANAGER.get_or_init(|| FileManager::new(default_base_path()))
    }

    /// Lock the cache. Every cache operation runs under this one lock.
    pub fn cache(&self) -> MutexGuard<'_, DirectoryCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn base_path(&self) -> PathBuf {
        self.cache().root().to_path_buf()
    }

    /// Point the manager at a new base directory.
    ///
    /// Only allowed before anything has been cached: snapshots are never
    /// dropped, and relative keys would name different directories under a
    /// new base. The probe decision is kept.
    pub fn set_base_path(&self, path: &Path) -> bool {
        if !path.is_dir() {
            warn!("[manager] base path {:?} is not a directory", path);
            return false;
        }

        let mut cache = self.cache();
        if !cache.is_empty() {
            warn!(
                "[manager] base path already in use ({} cached dirs), keeping {:?}",
                cache.len(),
                cache.root()
            );
            return false;
        }

        let probe = cache.probe_status();
        *cache = DirectoryCache::with_probe(path, probe);
        debug!("[manager] base path set to {:?}", path);
        true
    }

    /// List `dir` (the base directory when `None`) through the cache.
    ///
    /// `callback` receives the name and modification time of every entry that
    /// passes `filter` and the `extension` filter (empty matches all). The
    /// cache lock is released before the first callback runs, so callbacks may
    /// use the manager.
    pub fn list_directory_contents<F>(
        &self,
        dir: Option<&str>,
        filter: TypeFilter,
        extension: &str,
        mut callback: F,
    ) -> Result<ListOutcome, CacheError>
    where
        F: FnMut(&str, i64) -> ListControl,
    {
        let key = dir.unwrap_or(BASE_DIR_KEY);
        let matched: Vec<(String, i64)> = {
            let mut cache = self.cache();
            let snapshot = cache.snapshot(key)?;
            snapshot
                .iter()
                .filter(|e| filter.intersects(e.kind().into()))
                .filter(|e| entry_matches_extension(e, extension))
                .map(|e| (e.name().to_owned(), e.modified_time()))
                .collect()
        };

        for (name, modified_time) in &matched {
            if callback(name, *modified_time) == ListControl::Match {
                return Ok(ListOutcome::Match);
            }
        }
        Ok(ListOutcome::NoMatch)
    }

    /// Open `name` relative to the base directory. Opening for writing notes
    /// the file in the base snapshot.
    pub fn open_file(&self, name: &str, mode: FileMode) -> io::Result<File> {
        let path = self.base_path().join(name);
        let file = match mode {
            FileMode::Read => File::open(&path)?,
            FileMode::Write => File::create(&path)?,
            FileMode::Append => OpenOptions::new().create(true).append(true).open(&path)?,
        };

        if mode != FileMode::Read && is_base_entry(name) {
            self.cache().note_file_written(name);
        }
        Ok(file)
    }

    /// Write `contents` to `name` in the base directory.
    pub fn write_file(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        fs::write(self.base_path().join(name), contents)?;
        if is_base_entry(name) {
            self.cache().note_file_written(name);
        }
        Ok(())
    }

    pub fn remove_file(&self, name: &str) -> io::Result<()> {
        fs::remove_file(self.base_path().join(name))?;
        if is_base_entry(name) {
            self.cache().note_file_removed(name);
        }
        Ok(())
    }

    /// Create a directory relative to the base path. An existing directory is fine.
    pub fn create_directory(&self, path: &str) -> io::Result<()> {
        match fs::create_dir(self.base_path().join(path)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Only plain names live directly in the base directory; `saves/a.sav` does not.
fn is_base_entry(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
