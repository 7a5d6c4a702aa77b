//! Entry type detection.
//!
//! Some targets have no usable `stat`. Whether metadata queries work is decided
//! once, on the first entry ever classified, and that answer is reused for every
//! later entry. Without metadata, only extensionless names are tried as
//! directories (by opening them); anything with a dot is assumed to be a file.
//! This is an approximation: a directory named `maps.v2` is reported as `File`.

use std::{
    fs, io,
    path::{MAIN_SEPARATOR, Path},
    sync::OnceLock,
    time::SystemTime,
};

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::entry::EntryType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Untested,
    Works,
    Unavailable,
}

/// Counters for filesystem work done by the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Real directory scans (cache misses that opened a directory).
    pub scans: usize,
    /// Metadata queries issued, including the one-shot probe.
    pub metadata_queries: usize,
    /// Trial directory opens made while metadata is unavailable.
    pub dir_probes: usize,
}

/// One-shot metadata availability flag. Assigned at most once.
#[derive(Debug, Default)]
pub(crate) struct MetadataProbe {
    works: OnceLock<bool>,
}

impl MetadataProbe {
    pub(crate) fn forced(status: ProbeStatus) -> Self {
        let probe = Self::default();
        match status {
            ProbeStatus::Untested => {}
            ProbeStatus::Works => {
                let _ = probe.works.set(true);
            }
            ProbeStatus::Unavailable => {
                let _ = probe.works.set(false);
            }
        }
        probe
    }

    pub(crate) fn status(&self) -> ProbeStatus {
        match self.works.get() {
            None => ProbeStatus::Untested,
            Some(true) => ProbeStatus::Works,
            Some(false) => ProbeStatus::Unavailable,
        }
    }

    /// Classify the entry at `full_path`, returning its type and modification
    /// time in unix seconds (`0` when unknown).
    pub(crate) fn classify(
        &self,
        full_path: &Path,
        has_extension: bool,
        stats: &mut ScanStats,
    ) -> (EntryType, i64) {
        let mut first_answer = None;
        let works = *self.works.get_or_init(|| {
            stats.metadata_queries += 1;
            let answer = fs::metadata(full_path);
            let works = metadata_call_works(&answer);
            if works {
                info!("[probe] metadata queries available");
            } else {
                info!("[probe] metadata queries unavailable, falling back to directory probing");
            }
            first_answer = Some(answer);
            works
        });

        if works {
            let answer = first_answer.unwrap_or_else(|| {
                stats.metadata_queries += 1;
                fs::metadata(full_path)
            });
            match answer {
                Ok(meta) => {
                    let kind = if meta.is_dir() {
                        EntryType::Directory
                    } else {
                        EntryType::File
                    };
                    (kind, to_unix_secs(meta.modified().ok()))
                }
                Err(e) => {
                    debug!("[probe] metadata({:?}) failed: {e}", full_path);
                    (EntryType::File, 0)
                }
            }
        } else if has_extension {
            (EntryType::File, 0)
        } else {
            stats.dir_probes += 1;
            // The handle is dropped at the end of the statement; it is only a probe.
            let is_dir = fs::read_dir(full_path).is_ok();
            let kind = if is_dir {
                EntryType::Directory
            } else {
                EntryType::File
            };
            (kind, 0)
        }
    }
}

/// A missing file still means the metadata call itself works; any other
/// failure is taken as "unsupported here".
fn metadata_call_works(answer: &io::Result<fs::Metadata>) -> bool {
    match answer {
        Ok(_) => true,
        Err(e) => e.kind() == io::ErrorKind::NotFound,
    }
}

/// Join a directory key and an entry name, inserting a separator only when the
/// directory does not already end with one.
pub fn entry_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        return name.to_owned();
    }

    let mut full = String::with_capacity(parent.len() + 1 + name.len());
    full.push_str(parent);
    if !parent.ends_with('/') && !parent.ends_with(MAIN_SEPARATOR) {
        full.push(MAIN_SEPARATOR);
    }
    full.push_str(name);
    full
}

pub(crate) fn to_unix_secs(t: Option<SystemTime>) -> i64 {
    t.map(|tt| DateTime::<Utc>::from(tt).timestamp())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
