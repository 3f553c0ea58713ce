//! Strain table rewrite command
//!
//! Runs the rewrite pipeline on the fixed `ncma.txt` / `ncma.json` pair in
//! the working directory.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tracing::error;

use crate::cli::args::{OutputFormat, RewriteArgs};
use crate::error::LinkerError;
use crate::rewrite::{self, INPUT_PATH, OUTPUT_PATH, RewriteSummary};

/// Machine-readable run report.
#[derive(Debug, Serialize)]
struct RewriteReport<'a> {
    input: &'a str,
    output: Option<&'a str>,
    records: usize,
}

/// Rewrite `ncma.txt` into `ncma.json`, or only check it with `--check`.
///
/// On success the human format prints nothing unless `--check` is given.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or rewritten, or the
/// output cannot be written.
pub fn run(args: &RewriteArgs) -> Result<(), LinkerError> {
    let input = Path::new(INPUT_PATH);
    let result = if args.check {
        rewrite::check(input)
    } else {
        rewrite::run(input, Path::new(OUTPUT_PATH))
    };

    let summary = result.inspect_err(|e| error!(error = %e, "rewrite aborted"))?;
    report(&mut io::stdout().lock(), args, summary)
}

fn report<W: Write>(
    out: &mut W,
    args: &RewriteArgs,
    summary: RewriteSummary,
) -> Result<(), LinkerError> {
    match args.format {
        OutputFormat::Human => {
            if args.check {
                writeln!(out, "{INPUT_PATH}: {} records OK", summary.records)?;
            }
        }
        OutputFormat::Json => {
            let report = RewriteReport {
                input: INPUT_PATH,
                output: (!args.check).then_some(OUTPUT_PATH),
                records: summary.records,
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        }
    }
    Ok(())
}
