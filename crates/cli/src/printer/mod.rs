use std::io::{self, Write};

use chrono::DateTime;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned, human-readable table.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// One listed entry.
#[derive(Debug, Clone, Serialize)]
pub struct ListRow {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Unix seconds, `0` when unknown.
    pub modified: i64,
}

/// Summary printed after all rows.
#[derive(Debug)]
pub struct ListSummary<'a> {
    pub dir: &'a str,
    pub total: usize,
    pub scans: usize,
    pub probe: &'a str,
}

/// Trait for printing directory listings.
pub trait ListPrinter {
    fn print_row(&mut self, row: &ListRow) -> io::Result<()>;

    fn finish(&mut self, summary: &ListSummary<'_>) -> io::Result<()>;
}

pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    quiet: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    pub fn new(out: W, err: E, quiet: bool) -> Self {
        Self { out, err, quiet }
    }
}

fn format_time(secs: i64) -> String {
    if secs == 0 {
        return "-".to_owned();
    }
    DateTime::from_timestamp(secs, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_owned())
}

impl<W: Write, E: Write> ListPrinter for HumanPrinter<W, E> {
    fn print_row(&mut self, row: &ListRow) -> io::Result<()> {
        writeln!(
            self.out,
            "{:<4}  {:<19}  {}",
            row.kind,
            format_time(row.modified),
            row.name
        )
    }

    fn finish(&mut self, summary: &ListSummary<'_>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(
            self.err,
            "\n[list] {} entries in {:?} (scans: {}, probe: {})",
            summary.total, summary.dir, summary.scans, summary.probe
        )
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    quiet: bool,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, quiet: bool) -> Self {
        Self { out, err, quiet }
    }
}

impl<W: Write, E: Write> ListPrinter for JsonPrinter<W, E> {
    fn print_row(&mut self, row: &ListRow) -> io::Result<()> {
        let line = serde_json::to_string(row).map_err(io::Error::other)?;
        writeln!(self.out, "{line}")
    }

    fn finish(&mut self, summary: &ListSummary<'_>) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let obj = serde_json::json!({
            "type": "summary",
            "dir": summary.dir,
            "total": summary.total,
            "scans": summary.scans,
            "probe": summary.probe,
        });
        writeln!(self.err, "{obj}")
    }
}

pub fn make_printer(format: OutputFormat, quiet: bool) -> Box<dyn ListPrinter> {
    match format {
        OutputFormat::Human => Box::new(HumanPrinter::new(io::stdout(), io::stderr(), quiet)),
        OutputFormat::Json => Box::new(JsonPrinter::new(io::stdout(), io::stderr(), quiet)),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
