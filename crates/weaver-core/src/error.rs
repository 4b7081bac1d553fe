//! Structured error types shared across Weaver crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`WeaverError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (identifiers, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the Weaver compiler and executor.
///
/// Data anomalies encountered while executing a WSpec (missing columns,
/// unmatched branch keys, degenerate colour domains) are never raised as
/// errors — they are handled by the router's default branch and by
/// per-measure null filtering. Only compile-time validation failures and
/// malformed specs are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum WeaverError {
    /// SDD validation failures: unknown ids, invalid ordering, cyclic
    /// segment chains, duplicate partition labels.
    #[error("validation error: {0}")]
    Validation(ErrorInfo),
    /// A WSpec itself is malformed (unknown aggregation, malformed colour
    /// spec) — this can only happen to a hand-built or hand-edited WSpec.
    #[error("malformed spec: {0}")]
    MalformedSpec(ErrorInfo),
    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Filesystem or dataset I/O failure (CLI boundary only).
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

impl WeaverError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            WeaverError::Validation(info)
            | WeaverError::MalformedSpec(info)
            | WeaverError::Serde(info)
            | WeaverError::Io(info) => info,
        }
    }

    /// Shorthand for constructing a [`WeaverError::Validation`].
    pub fn validation(code: impl Into<String>, message: impl Into<String>) -> Self {
        WeaverError::Validation(ErrorInfo::new(code, message))
    }

    /// Shorthand for constructing a [`WeaverError::MalformedSpec`].
    pub fn malformed(code: impl Into<String>, message: impl Into<String>) -> Self {
        WeaverError::MalformedSpec(ErrorInfo::new(code, message))
    }
}
