use bitflags::bitflags;
use dircache_runtime::FILE_NAME_MAX;

/// What a cached entry is. Symlinks, sockets and friends are never modelled:
/// anything not detected as a directory is a `File`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Directory,
    File,
}

bitflags! {
    /// Entry type filter used when listing a directory.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFilter: u8 {
        const DIR = 0b01;
        const FILE = 0b10;
        const ANY = Self::DIR.bits() | Self::FILE.bits();
    }
}

impl From<EntryType> for TypeFilter {
    fn from(kind: EntryType) -> Self {
        match kind {
            EntryType::Directory => TypeFilter::DIR,
            EntryType::File => TypeFilter::FILE,
        }
    }
}

/// One cached directory entry.
///
/// The extension is stored as an offset into `name`. `name` is never mutated
/// after construction, so the offset stays valid for the entry's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    name: String,
    ext_offset: usize,
    kind: EntryType,
    modified_time: i64,
}

impl EntryInfo {
    pub fn new(name: &str, kind: EntryType, modified_time: i64) -> Self {
        let name = bounded(name).to_owned();
        let ext_offset = first_dot_offset(&name);
        Self {
            name,
            ext_offset,
            kind,
            modified_time,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Everything after the FIRST dot: `archive.tar.gz` yields `tar.gz`.
    /// Empty when the name has no dot or ends with its only dot.
    #[inline]
    pub fn extension(&self) -> &str {
        &self.name[self.ext_offset..]
    }

    #[inline]
    pub fn has_extension(&self) -> bool {
        self.ext_offset < self.name.len()
    }

    #[inline]
    pub fn kind(&self) -> EntryType {
        self.kind
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryType::Directory
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        self.kind == EntryType::File
    }

    /// Unix seconds, `0` when unknown.
    #[inline]
    pub fn modified_time(&self) -> i64 {
        self.modified_time
    }

    pub(crate) fn set_kind(&mut self, kind: EntryType) {
        self.kind = kind;
    }

    pub(crate) fn set_modified_time(&mut self, secs: i64) {
        self.modified_time = secs;
    }
}

/// Byte offset just past the first `.` in `name`, or `name.len()` without one.
pub fn first_dot_offset(name: &str) -> usize {
    name.find('.').map_or(name.len(), |pos| pos + 1)
}

/// Truncate `s` to fit `FILE_NAME_MAX` (minus the terminator slot) on a char boundary.
pub fn bounded(s: &str) -> &str {
    let limit = FILE_NAME_MAX - 1;
    if s.len() <= limit {
        return s;
    }

    let mut end = limit;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
