mod cache;
mod entry;
mod error;
mod manager;
mod names;
mod probe;
mod snapshot;

pub use cache::DirectoryCache;
pub use entry::{EntryInfo, EntryType, TypeFilter, first_dot_offset};
pub use error::CacheError;
pub use manager::{FileManager, FileMode, ListControl, ListOutcome};
pub use names::{
    CasePolicy, compare_filename_prefix, compare_filename_prefix_with, compare_filenames,
    compare_filenames_with, entry_matches_extension, entry_matches_extension_with,
    filenames_equal, filenames_equal_with,
};
pub use probe::{ProbeStatus, ScanStats, entry_path};
pub use snapshot::DirectorySnapshot;
