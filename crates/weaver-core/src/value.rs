//! A small typed value used for both flow-row attributes and aggregated
//! measures, and the [`Row`] trait flow datasets implement to expose them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A column value read from a flow dataset row, or computed as an
/// aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A string-valued column (commonly `source`, `target`, categorical
    /// dimensions).
    Str(String),
    /// A numeric column (commonly the measure or link-width column).
    Num(f64),
    /// A boolean-valued column.
    Bool(bool),
}

impl Value {
    /// Returns the canonical string form used as a routing-tree branch
    /// key. Every branch key in the wire format is a JSON object key, so
    /// routing always compares on this stringified form.
    pub fn branch_key(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Num(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Value::Bool(b) => b.to_string(),
        }
    }

    /// Interprets the value as a number, for measure aggregation and link
    /// width. Returns `None` for non-numeric values (treated the same as
    /// an absent column by the executor).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Str(s) => s.parse::<f64>().ok(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

/// A single flow record. The executor and router only ever read columns
/// by name, so any dataset representation (CSV row, in-memory map,
/// columnar batch) can implement this trait without the core crate
/// knowing about it.
pub trait Row {
    /// Returns the value of `column` in this row, or `None` if the row
    /// has no such column. Unknown/missing columns are never an error —
    /// they are handled by the router's default branch and by
    /// per-measure null filtering.
    fn get(&self, column: &str) -> Option<Value>;
}

impl Row for BTreeMap<String, Value> {
    fn get(&self, column: &str) -> Option<Value> {
        BTreeMap::get(self, column).cloned()
    }
}
