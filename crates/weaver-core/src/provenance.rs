//! Schema versioning and provenance descriptors attached to a compiled WSpec.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Semantic version describing the shape of a serialized WSpec.
///
/// Serializes as a bare `"major.minor"` string (e.g. `"2.0"`), matching
/// the WSpec wire format — not as a struct of fields. `patch` is carried
/// for in-process comparison only and is never part of the wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SchemaVersion {
    /// Major version incremented for breaking wire-format changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for documentation or bug fixes.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(2, 0, 0)
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl std::str::FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let major = parts
            .next()
            .ok_or_else(|| format!("missing major version in {s:?}"))?
            .parse::<u32>()
            .map_err(|e| e.to_string())?;
        let minor = parts
            .next()
            .ok_or_else(|| format!("missing minor version in {s:?}"))?
            .parse::<u32>()
            .map_err(|e| e.to_string())?;
        let patch = match parts.next() {
            Some(p) => p.parse::<u32>().map_err(|e| e.to_string())?,
            None => 0,
        };
        Ok(Self::new(major, minor, patch))
    }
}

impl Serialize for SchemaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{}.{}", self.major, self.minor))
    }
}

struct SchemaVersionVisitor;

impl Visitor<'_> for SchemaVersionVisitor {
    type Value = SchemaVersion;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a schema version string like \"2.0\"")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for SchemaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(SchemaVersionVisitor)
    }
}

/// Provenance stamped onto every WSpec produced by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Provenance {
    /// Canonical hash of the normalized SDD that produced this WSpec.
    pub input_hash: String,
}
