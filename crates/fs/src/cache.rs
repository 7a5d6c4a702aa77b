use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
use dircache_runtime::BASE_DIR_KEY;
use log::{debug, warn};

use crate::{
    entry::{EntryInfo, EntryType, bounded},
    error::CacheError,
    probe::{MetadataProbe, ProbeStatus, ScanStats, entry_path},
    snapshot::DirectorySnapshot,
};

/// Cache of single-level directory listings, keyed by the exact path string.
///
/// Snapshots are built on first request and trusted afterwards: there is no
/// staleness check. The base directory (key `"."`) is the only one kept in sync
/// with writes and deletes, through [`note_file_written`] and
/// [`note_file_removed`].
///
/// Relative keys are resolved against `root`, the application's base directory.
///
/// [`note_file_written`]: DirectoryCache::note_file_written
/// [`note_file_removed`]: DirectoryCache::note_file_removed
#[derive(Debug)]
pub struct DirectoryCache {
    root: PathBuf,
    /// Discovery order. The number of distinct directories is small, so a
    /// linear scan is fine.
    dirs: Vec<DirectorySnapshot>,
    probe: MetadataProbe,
    stats: ScanStats,
}

impl DirectoryCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dirs: Vec::new(),
            probe: MetadataProbe::default(),
            stats: ScanStats::default(),
        }
    }

    /// Build a cache whose metadata probe is already decided.
    pub fn with_probe(root: impl Into<PathBuf>, status: ProbeStatus) -> Self {
        Self {
            probe: MetadataProbe::forced(status),
            ..Self::new(root)
        }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn probe_status(&self) -> ProbeStatus {
        self.probe.status()
    }

    #[inline]
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Number of real directory scans performed so far.
    #[inline]
    pub fn scan_count(&self) -> usize {
        self.stats.scans
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Cached snapshots, in the order they were first scanned.
    pub fn dirs(&self) -> impl Iterator<Item = &DirectorySnapshot> {
        self.dirs.iter()
    }

    /// Cached snapshot for `path`, without scanning.
    pub fn get(&self, path: &str) -> Option<&DirectorySnapshot> {
        self.position(path).map(|i| &self.dirs[i])
    }

    /// Return the snapshot for `path`, scanning the directory on first use.
    ///
    /// A failed open is reported as [`CacheError::NotFound`] and is not cached,
    /// so a later call tries again.
    pub fn snapshot(&mut self, path: &str) -> Result<&DirectorySnapshot, CacheError> {
        if let Some(i) = self.position(path) {
            return Ok(&self.dirs[i]);
        }

        let snapshot = self.scan(path)?;
        self.dirs.push(snapshot);
        Ok(&self.dirs[self.dirs.len() - 1])
    }

    /// Record that `name` in the base directory was just written.
    ///
    /// Does nothing until the base directory has been scanned. Hidden names
    /// (leading `.`) are never stored, matching what a scan would produce.
    pub fn note_file_written(&mut self, name: &str) {
        if name.starts_with('.') {
            debug!("[cache] ignoring write of hidden {name:?}");
            return;
        }

        let Some(base) = self.base_snapshot_mut() else {
            debug!("[cache] base dir not scanned, ignoring write of {name:?}");
            return;
        };

        let now = Utc::now().timestamp();
        match base.position(name) {
            Some(i) => base.entry_mut(i).set_modified_time(now),
            None => {
                base.insert_front(EntryInfo::new(name, EntryType::File, now));
                debug!("[cache] added {name:?} to base dir");
            }
        }
    }

    /// Record that `name` in the base directory was just deleted.
    /// Unknown names and an unscanned base directory are ignored.
    pub fn note_file_removed(&mut self, name: &str) {
        let Some(base) = self.base_snapshot_mut() else {
            return;
        };

        if let Some(i) = base.position(name) {
            let removed = base.remove(i);
            debug!("[cache] dropped {:?} from base dir", removed.name());
        }
    }

    fn base_snapshot_mut(&mut self) -> Option<&mut DirectorySnapshot> {
        let i = self.position(BASE_DIR_KEY)?;
        Some(&mut self.dirs[i])
    }

    fn position(&self, path: &str) -> Option<usize> {
        let key = bounded(path);
        self.dirs.iter().position(|d| d.path() == key)
    }

    fn resolve(&self, key: &str) -> PathBuf {
        let p = Path::new(key);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }

    fn scan(&mut self, key: &str) -> Result<DirectorySnapshot, CacheError> {
        let dir = self.resolve(key);
        let rd = fs::read_dir(&dir).map_err(|source| CacheError::NotFound {
            path: key.to_owned(),
            source,
        })?;

        self.stats.scans += 1;
        let mut snapshot = DirectorySnapshot::new(key);

        for entry_res in rd {
            let entry = match entry_res {
                Ok(e) => e,
                Err(e) => {
                    // Keep what was read so far.
                    warn!("[cache] enumeration of {:?} stopped early: {e}", dir);
                    break;
                }
            };

            let name_os = entry.file_name();
            let Some(name) = name_os.to_str() else {
                debug!("[cache] skipping non UTF-8 name {:?} in {:?}", name_os, dir);
                continue;
            };

            if name.starts_with('.') {
                continue;
            }

            let mut info = EntryInfo::new(name, EntryType::File, 0);
            let full_path = self.resolve(&entry_path(key, name));
            let (kind, modified_time) =
                self.probe
                    .classify(&full_path, info.has_extension(), &mut self.stats);
            info.set_kind(kind);
            info.set_modified_time(modified_time);

            snapshot.push(info);
        }

        debug!(
            "[cache] scanned {:?}: {} entries (probe {:?})",
            dir,
            snapshot.len(),
            self.probe.status()
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
