use std::cmp::Ordering;

use dircache_runtime::should_case_correct;

use crate::entry::{EntryInfo, EntryType};

/// How file names are collated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePolicy {
    /// Plain byte order.
    Sensitive,
    /// Byte order after ASCII lowercasing.
    Insensitive,
}

impl CasePolicy {
    /// Policy selected by the process-wide case-correct flag.
    pub fn current() -> Self {
        if should_case_correct() {
            CasePolicy::Insensitive
        } else {
            CasePolicy::Sensitive
        }
    }
}

fn compare_bytes(policy: CasePolicy, a: &[u8], b: &[u8]) -> Ordering {
    match policy {
        CasePolicy::Sensitive => a.cmp(b),
        CasePolicy::Insensitive => a
            .iter()
            .map(u8::to_ascii_lowercase)
            .cmp(b.iter().map(u8::to_ascii_lowercase)),
    }
}

pub fn compare_filenames_with(policy: CasePolicy, a: &str, b: &str) -> Ordering {
    compare_bytes(policy, a.as_bytes(), b.as_bytes())
}

pub fn compare_filenames(a: &str, b: &str) -> Ordering {
    compare_filenames_with(CasePolicy::current(), a, b)
}

pub fn filenames_equal_with(policy: CasePolicy, a: &str, b: &str) -> bool {
    compare_filenames_with(policy, a, b) == Ordering::Equal
}

pub fn filenames_equal(a: &str, b: &str) -> bool {
    filenames_equal_with(CasePolicy::current(), a, b)
}

/// Compare at most `prefix_len` bytes of `name` and `prefix`.
///
/// `Equal` means `name` starts with the first `prefix_len` bytes of `prefix`.
/// A `name` shorter than the compared prefix sorts before it.
pub fn compare_filename_prefix_with(
    policy: CasePolicy,
    name: &str,
    prefix: &str,
    prefix_len: usize,
) -> Ordering {
    let a = name.as_bytes();
    let b = prefix.as_bytes();
    compare_bytes(
        policy,
        &a[..a.len().min(prefix_len)],
        &b[..b.len().min(prefix_len)],
    )
}

pub fn compare_filename_prefix(name: &str, prefix: &str, prefix_len: usize) -> Ordering {
    compare_filename_prefix_with(CasePolicy::current(), name, prefix, prefix_len)
}

/// Extension filter test. An empty filter matches everything, and
/// non-file entries always pass so callers can still descend into them.
pub fn entry_matches_extension_with(policy: CasePolicy, entry: &EntryInfo, extension: &str) -> bool {
    if extension.is_empty() || entry.kind() != EntryType::File {
        return true;
    }
    filenames_equal_with(policy, entry.extension(), extension)
}

pub fn entry_matches_extension(entry: &EntryInfo, extension: &str) -> bool {
    entry_matches_extension_with(CasePolicy::current(), entry, extension)
}

#[cfg(test)]
#[path = "names_tests.rs"]
mod tests;
