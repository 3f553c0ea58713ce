//! Strain table link rewriter.
//!
//! Reads the NCMA strain table (`ncma.txt`), replaces the link column of
//! every record with an anchor to the record's catalog page, and writes the
//! result to `ncma.json`. The pipeline is a single synchronous pass: the
//! whole input is parsed and transformed in memory, fully encoded, and only
//! then is the output file created. Any failure aborts the run.

pub mod document;
pub mod encoder;
pub mod link;

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::RewriteError;

pub use document::{Document, RECORDS_KEY, RewriteSummary};
pub use link::catalog_link;

/// Source table, relative to the working directory.
pub const INPUT_PATH: &str = "ncma.txt";

/// Destination table, relative to the working directory.
pub const OUTPUT_PATH: &str = "ncma.json";

/// Reads and parses the table at `path`.
///
/// # Errors
///
/// Returns [`RewriteError::InputNotFound`] if the file cannot be read and
/// [`RewriteError::MalformedInput`] if its content is not a strain table.
pub fn load(path: &Path) -> Result<Document, RewriteError> {
    let bytes = fs::read(path).map_err(|source| RewriteError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "input read");

    let document = Document::from_slice(&bytes).map_err(|e| e.with_input_path(path))?;
    info!(path = %path.display(), records = document.len(), "table loaded");
    Ok(document)
}

/// Encodes `document` and writes it to `path`, replacing any existing file.
///
/// The document is fully encoded before the file is opened. If writing
/// fails after the file was created, the partial file is removed.
///
/// # Errors
///
/// Returns [`RewriteError::Encode`] if encoding fails and
/// [`RewriteError::OutputWrite`] if the file cannot be written.
pub fn save(document: &Document, path: &Path) -> Result<(), RewriteError> {
    save_with(document, path, |p: &Path| File::create(p))
}

fn save_with<W, F>(document: &Document, path: &Path, create: F) -> Result<(), RewriteError>
where
    W: Write,
    F: FnOnce(&Path) -> io::Result<W>,
{
    let bytes = document.to_vec()?;
    debug!(bytes = bytes.len(), "table encoded");

    let output_error = |source| RewriteError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut out = create(path).map_err(output_error)?;
    if let Err(source) = out.write_all(&bytes).and_then(|()| out.flush()) {
        drop(out);
        match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "partial output removed"),
            Err(e) => warn!(path = %path.display(), error = %e, "could not remove partial output"),
        }
        return Err(output_error(source));
    }

    info!(path = %path.display(), bytes = bytes.len(), "table written");
    Ok(())
}

/// Loads `input`, rewrites every record's link column, and writes `output`.
///
/// # Errors
///
/// Returns the first failure of [`load`], [`Document::rewrite_links`] or
/// [`save`]. Nothing is written unless every record was rewritten.
pub fn run(input: &Path, output: &Path) -> Result<RewriteSummary, RewriteError> {
    let mut document = load(input)?;
    let summary = document.rewrite_links()?;
    debug!(records = summary.records, "links rewritten");
    save(&document, output)?;
    Ok(summary)
}

/// Loads `input` and rewrites it in memory without writing anything.
///
/// # Errors
///
/// Returns the first failure of [`load`] or [`Document::rewrite_links`].
pub fn check(input: &Path) -> Result<RewriteSummary, RewriteError> {
    let mut document = load(input)?;
    document.rewrite_links()
}
