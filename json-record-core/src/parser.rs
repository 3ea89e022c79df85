use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::record::Record;

/// Errors that can occur while reading a JSON record collection.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input bytes were not valid JSON.
    #[error("failed to parse JSON at line {line}, column {column}: {source}")]
    Json {
        line: usize,
        column: usize,
        source: serde_json::Error,
    },
    /// Failed to read input file.
    #[error("failed to read JSON file: {0}")]
    Io(#[from] std::io::Error),
    /// Document decoded but does not have the shape of a record collection.
    #[error("malformed record collection: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(source: serde_json::Error) -> Self {
        ParseError::Json {
            line: source.line(),
            column: source.column(),
            source,
        }
    }
}

/// Decode JSON bytes without imposing any structure.
pub fn parse(json: &[u8]) -> Result<Value, ParseError> {
    Ok(serde_json::from_slice(json)?)
}

/// Read and decode a JSON file without imposing any structure.
pub fn parse_file(path: &Path) -> Result<Value, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

/// Convert a decoded document into records.
///
/// The document must be an array whose every element is an object.
pub fn records(value: Value) -> Result<Vec<Record>, ParseError> {
    let Value::Array(items) = value else {
        return Err(ParseError::Malformed(format!(
            "expected a top-level array, found {}",
            kind_name(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(map) => Ok(Record::from_map(map)),
            other => Err(ParseError::Malformed(format!(
                "entry #{idx} is {}, expected an object",
                kind_name(&other)
            ))),
        })
        .collect()
}

/// Read a JSON file and convert it into records.
pub fn parse_records_file(path: &Path) -> Result<Vec<Record>, ParseError> {
    records(parse_file(path)?)
}

/// Human-readable JSON kind, used in error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
