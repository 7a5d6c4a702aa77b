use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use dircache_runtime::BASE_DIR_KEY;
use log::error;

use crate::commands::BaseOptions;

#[derive(Debug, Args)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub base: BaseOptions,
}

pub fn run(args: ProbeArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[probe] {e:#}");
            eprintln!("[probe] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ProbeArgs) -> Result<ExitCode> {
    let manager = args.base.manager()?;
    let mut cache = manager.cache();

    let entries = cache
        .snapshot(BASE_DIR_KEY)
        .context("scanning base directory")?
        .len();
    let stats = cache.stats();

    println!("[probe] base:     {}", cache.root().display());
    println!("[probe] status:   {:?}", cache.probe_status());
    println!("[probe] entries:  {}", entries);
    println!("[probe] scans:    {}", stats.scans);
    println!("[probe] metadata: {}", stats.metadata_queries);
    println!("[probe] dir opens: {}", stats.dir_probes);

    Ok(ExitCode::SUCCESS)
}
