use std::io;

use thiserror::Error;

/// Errors returned by the directory cache.
///
/// Allocation failure is not represented: the global allocator aborts the
/// process, which is the only safe outcome for a half-built cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The directory does not exist, is not a directory, or cannot be opened.
    /// Nothing is cached for it.
    #[error("cannot open directory {path:?}: {source}")]
    NotFound {
        path: String,
        #[source]
        source: io::Error,
    },
}
