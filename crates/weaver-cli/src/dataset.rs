//! CSV flow-dataset ingestion: adapts a CSV file into the
//! `BTreeMap<String, Value>` row representation `weaver_core::Row` is
//! already implemented for.

use std::collections::BTreeMap;
use std::path::Path;

use weaver_core::{ErrorInfo, Value, WeaverError};

fn parse_cell(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<f64>() {
        return Value::Num(n);
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Str(raw.to_string()),
    }
}

/// Reads `path` as a header'd CSV file, returning one row per record.
/// Every cell is parsed as a number, then a boolean, falling back to a
/// string — the same permissive typing a flow dataset's `source`,
/// `target`, and measure columns need to share one column representation.
pub fn read_csv(path: &Path) -> Result<Vec<BTreeMap<String, Value>>, WeaverError> {
    let mut reader = csv::Reader::from_path(path).map_err(|err| {
        WeaverError::Io(
            ErrorInfo::new("dataset-read-failed", err.to_string())
                .with_context("path", path.display()),
        )
    })?;
    let headers = reader
        .headers()
        .map_err(|err| {
            WeaverError::Io(ErrorInfo::new("dataset-read-failed", err.to_string()))
        })?
        .clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|err| {
            WeaverError::Io(ErrorInfo::new("dataset-read-failed", err.to_string()))
        })?;
        let row: BTreeMap<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(column, cell)| (column.to_string(), parse_cell(cell)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
