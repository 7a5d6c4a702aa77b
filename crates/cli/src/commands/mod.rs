pub mod list;
pub mod probe;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use dircache_fs::FileManager;
use dircache_runtime::set_case_correct;
pub use list::ListArgs;
pub use probe::ProbeArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List a directory through the cache.
    ///
    /// Example:
    ///   dircache list
    ///   dircache list saves --type file --ext sav
    List(ListArgs),

    /// Scan the base directory and report whether metadata queries work.
    Probe(ProbeArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct BaseOptions {
    /// Base directory (defaults to $DIRCACHE_BASE_PATH, then the current directory)
    #[arg(long, value_name = "PATH")]
    pub base: Option<PathBuf>,

    /// Compare file names case-insensitively
    #[arg(long, short = 'i')]
    pub ignore_case: bool,
}

impl BaseOptions {
    pub fn manager(&self) -> anyhow::Result<&'static FileManager> {
        if self.ignore_case {
            set_case_correct(Some(true));
        }

        let manager = FileManager::global();
        if let Some(base) = &self.base
            && !manager.set_base_path(base)
        {
            anyhow::bail!("base path {} is not a directory", base.display());
        }
        Ok(manager)
    }
}
