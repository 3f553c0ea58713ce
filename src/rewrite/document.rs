//! The `aaData` strain table document.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RewriteError;
use crate::rewrite::encoder;
use crate::rewrite::link::{ID_FIELD, LINK_FIELD, MIN_FIELDS, catalog_link};

/// Key holding the record table in the top-level object.
pub const RECORDS_KEY: &str = "aaData";

/// Outcome of a successful rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewriteSummary {
    /// Number of records whose link column was replaced.
    pub records: usize,
}

/// A loaded strain table.
///
/// Holds the whole top-level object so that keys other than `aaData` are
/// written back untouched and in their original position.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Map<String, Value>,
}

impl Document {
    /// Parses a document from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::MalformedInput`] if the bytes are not JSON or
    /// do not have the document shape.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RewriteError> {
        let root: Value = serde_json::from_slice(bytes)
            .map_err(|e| malformed_input(format!("invalid JSON: {e}")))?;
        Self::from_value(root)
    }

    /// Wraps an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::MalformedInput`] unless `root` is an object
    /// whose `aaData` member is an array.
    pub fn from_value(root: Value) -> Result<Self, RewriteError> {
        let root = match root {
            Value::Object(root) => root,
            other => {
                return Err(malformed_input(format!(
                    "top level is {}, expected an object",
                    kind(&other)
                )));
            }
        };
        match root.get(RECORDS_KEY) {
            Some(Value::Array(_)) => Ok(Self { root }),
            Some(other) => Err(malformed_input(format!(
                "'{RECORDS_KEY}' is {}, expected an array",
                kind(other)
            ))),
            None => Err(missing_records()),
        }
    }

    /// The records of the table, in file order.
    #[must_use]
    pub fn records(&self) -> &[Value] {
        match self.root.get(RECORDS_KEY) {
            Some(Value::Array(records)) => records.as_slice(),
            _ => &[],
        }
    }

    /// Number of records in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// Whether the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Replaces the link column of every record with its catalog link.
    ///
    /// All records are checked before any is modified, so on error the
    /// document is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::MalformedRecord`] for the first record that is
    /// not an array of at least ten fields with a string identifier.
    pub fn rewrite_links(&mut self) -> Result<RewriteSummary, RewriteError> {
        let links = self
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| record_link(index, record))
            .collect::<Result<Vec<_>, _>>()?;

        let Some(Value::Array(records)) = self.root.get_mut(RECORDS_KEY) else {
            return Err(missing_records());
        };
        for (record, link) in records.iter_mut().zip(links) {
            if let Value::Array(fields) = record {
                fields[LINK_FIELD] = Value::String(link);
            }
        }

        Ok(RewriteSummary {
            records: records.len(),
        })
    }

    /// Serializes the document in the legacy output layout.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::Encode`] if serialization fails.
    pub fn to_vec(&self) -> Result<Vec<u8>, RewriteError> {
        Ok(encoder::to_vec(&self.root)?)
    }

    /// Consumes the document, returning the top-level JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}

fn record_link(index: usize, record: &Value) -> Result<String, RewriteError> {
    let Value::Array(fields) = record else {
        return Err(RewriteError::MalformedRecord {
            index,
            reason: format!("expected an array, found {}", kind(record)),
        });
    };
    if fields.len() < MIN_FIELDS {
        return Err(RewriteError::MalformedRecord {
            index,
            reason: format!(
                "expected at least {MIN_FIELDS} fields, found {}",
                fields.len()
            ),
        });
    }
    match &fields[ID_FIELD] {
        Value::String(id) => Ok(catalog_link(id)),
        other => Err(RewriteError::MalformedRecord {
            index,
            reason: format!("field {ID_FIELD} is {}, expected a string", kind(other)),
        }),
    }
}

fn malformed_input(message: String) -> RewriteError {
    RewriteError::MalformedInput {
        path: None,
        message,
    }
}

fn missing_records() -> RewriteError {
    malformed_input(format!("missing key '{RECORDS_KEY}'"))
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
