use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::Command;
use dircache_runtime::logging;

#[derive(Debug, Parser)]
#[command(name = "dircache", version, about = "Cached directory listings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::List(args) => commands::list::run(args),
        Command::Probe(args) => commands::probe::run(args),
    }
}
