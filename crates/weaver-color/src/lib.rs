#![deny(missing_docs)]

//! Resolves a [`ColorSpec`] against one edge's attributes and aggregated
//! measure data, producing the hex colour string the wire format carries.

use std::collections::BTreeMap;

use weaver_core::{ColorSpec, Value};

/// The attributes of a single compiled edge a colour rule may read,
/// outside of aggregated measure data.
#[derive(Debug, Clone, Copy)]
pub struct EdgeAttrs<'a> {
    /// Flow-partition label (`"*"` when the edge has none).
    pub kind: &'a str,
    /// Source sub-node id, or `None` for a from-`Elsewhere` edge.
    pub source: Option<&'a str>,
    /// Target sub-node id, or `None` for a to-`Elsewhere` edge.
    pub target: Option<&'a str>,
    /// Time-partition label (`"*"` when the edge has none).
    pub time: &'a str,
}

/// Resolves `spec` for one edge, reading `edge` for the built-in
/// attributes and `data` (aggregated measure results) for everything
/// else. Always returns a colour: categorical falls back to its
/// `default`, quantitative clamps out-of-range values into `[0,1]`.
pub fn resolve(spec: &ColorSpec, edge: EdgeAttrs<'_>, data: &BTreeMap<String, Value>) -> String {
    match spec {
        ColorSpec::Categorical {
            attr,
            lookup,
            default,
        } => resolve_categorical(attr, lookup, default, edge, data),
        ColorSpec::Quantitative {
            attr,
            intensity,
            domain,
            palette,
        } => resolve_quantitative(attr, intensity.as_deref(), *domain, palette, data),
    }
}

fn edge_attr_key(attr: &str, edge: EdgeAttrs<'_>) -> Option<String> {
    match attr {
        "type" => Some(edge.kind.to_string()),
        "source" => edge.source.map(str::to_string),
        "target" => edge.target.map(str::to_string),
        "time" => Some(edge.time.to_string()),
        _ => None,
    }
}

fn resolve_categorical(
    attr: &str,
    lookup: &BTreeMap<String, String>,
    default: &str,
    edge: EdgeAttrs<'_>,
    data: &BTreeMap<String, Value>,
) -> String {
    let key = edge_attr_key(attr, edge).or_else(|| data.get(attr).map(Value::branch_key));
    key.and_then(|k| lookup.get(&k).cloned())
        .unwrap_or_else(|| default.to_string())
}

fn resolve_quantitative(
    attr: &str,
    intensity: Option<&str>,
    domain: [f64; 2],
    palette: &[String],
    data: &BTreeMap<String, Value>,
) -> String {
    let mut value = data.get(attr).and_then(Value::as_f64).unwrap_or(0.0);
    if let Some(intensity_attr) = intensity {
        let divisor = data
            .get(intensity_attr)
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        if divisor != 0.0 {
            value /= divisor;
        }
    }

    let [min, max] = domain;
    let t = if max == min {
        0.5
    } else {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    };

    interpolate(t, palette)
}

fn interpolate(t: f64, palette: &[String]) -> String {
    match palette.len() {
        0 => "#000000".to_string(),
        1 => palette[0].clone(),
        k => {
            let scaled = t * (k as f64 - 1.0);
            let lower = (scaled.floor() as usize).min(k - 2);
            let upper = lower + 1;
            let frac = scaled - lower as f64;
            let (lr, lg, lb) = parse_hex(&palette[lower]);
            let (ur, ug, ub) = parse_hex(&palette[upper]);
            let r = ((lr as f64) + (ur as f64 - lr as f64) * frac).floor() as u8;
            let g = ((lg as f64) + (ug as f64 - lg as f64) * frac).floor() as u8;
            let b = ((lb as f64) + (ub as f64 - lb as f64) * frac).floor() as u8;
            format_hex(r, g, b)
        }
    }
}

fn parse_hex(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
    (r, g, b)
}

fn format_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
