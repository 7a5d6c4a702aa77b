use crate::entry::{EntryInfo, bounded};

/// One directory as of its last scan.
///
/// `path` is the exact cache key. Entries keep readdir order, except entries
/// noted as written after the scan, which are placed first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySnapshot {
    path: String,
    entries: Vec<EntryInfo>,
}

impl DirectorySnapshot {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            path: bounded(path).to_owned(),
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn entries(&self) -> &[EntryInfo] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntryInfo> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact (case-sensitive) lookup by entry name.
    pub fn find(&self, name: &str) -> Option<&EntryInfo> {
        self.position(name).map(|i| &self.entries[i])
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        let name = bounded(name);
        self.entries.iter().position(|e| e.name() == name)
    }

    pub(crate) fn push(&mut self, entry: EntryInfo) {
        self.entries.push(entry);
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> &mut EntryInfo {
        &mut self.entries[index]
    }

    pub(crate) fn insert_front(&mut self, entry: EntryInfo) {
        self.entries.insert(0, entry);
    }

    pub(crate) fn remove(&mut self, index: usize) -> EntryInfo {
        self.entries.remove(index)
    }
}

impl<'a> IntoIterator for &'a DirectorySnapshot {
    type Item = &'a EntryInfo;
    type IntoIter = std::slice::Iter<'a, EntryInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
