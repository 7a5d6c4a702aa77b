use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use dircache_fs::{EntryType, ListControl, TypeFilter};
use log::error;

use crate::{
    commands::BaseOptions,
    printer::{ListPrinter, ListRow, ListSummary, OutputFormat, make_printer},
};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum KindArg {
    #[default]
    Any,
    File,
    Dir,
}

impl From<KindArg> for TypeFilter {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Any => TypeFilter::ANY,
            KindArg::File => TypeFilter::FILE,
            KindArg::Dir => TypeFilter::DIR,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Directory to list, relative to the base directory (base directory if omitted)
    pub dir: Option<String>,

    /// Entry type to keep
    #[arg(long = "type", short = 't', value_enum, default_value_t = KindArg::Any)]
    pub kind: KindArg,

    /// Keep only files with this extension (everything after the first dot)
    #[arg(long, short = 'e', default_value = "")]
    pub ext: String,

    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// Suppress the summary line
    #[arg(long, short = 'q')]
    pub quiet: bool,

    #[command(flatten)]
    pub base: BaseOptions,
}

pub fn run(args: ListArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[list] {e:#}");
            eprintln!("[list] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ListArgs) -> Result<ExitCode> {
    let manager = args.base.manager()?;
    let filter = TypeFilter::from(args.kind);
    let dir = args.dir.as_deref().unwrap_or(dircache_runtime::BASE_DIR_KEY);

    // Directories first, then files, each in cache order.
    let mut rows = Vec::new();
    for (kind, label) in [(EntryType::Directory, "dir"), (EntryType::File, "file")] {
        let wanted = TypeFilter::from(kind);
        if !filter.contains(wanted) {
            continue;
        }
        manager
            .list_directory_contents(Some(dir), wanted, &args.ext, |name, modified| {
                rows.push(ListRow {
                    name: name.to_owned(),
                    kind: label,
                    modified,
                });
                ListControl::Continue
            })
            .with_context(|| format!("listing {dir:?}"))?;
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let mut printer = make_printer(format, args.quiet);
    for row in &rows {
        printer.print_row(row)?;
    }

    let (scans, probe) = {
        let cache = manager.cache();
        (cache.scan_count(), format!("{:?}", cache.probe_status()))
    };
    printer.finish(&ListSummary {
        dir,
        total: rows.len(),
        scans,
        probe: &probe,
    })?;

    Ok(if rows.is_empty() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}
