//! Per-edge measure aggregation.

use weaver_core::{Aggregation, MeasureSpec, Row, Value};

/// Aggregates `spec` over the rows at `row_indices`, reading each row
/// through `get_row`. Absent or non-numeric values are skipped rather
/// than treated as zero; an aggregate with no present values is `0.0`.
pub fn aggregate<R: Row>(spec: &MeasureSpec, rows: &[R], row_indices: &[usize]) -> f64 {
    let values: Vec<f64> = row_indices
        .iter()
        .filter_map(|&i| rows[i].get(&spec.column))
        .filter_map(|v| v.as_f64())
        .collect();

    match spec.aggregation {
        Aggregation::Sum => values.iter().sum(),
        Aggregation::Mean => {
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        }
    }
}

/// Aggregates every measure in `measures` over `row_indices`, returning
/// the resulting `column -> value` map.
pub fn aggregate_all<R: Row>(
    measures: &[MeasureSpec],
    rows: &[R],
    row_indices: &[usize],
) -> std::collections::BTreeMap<String, Value> {
    measures
        .iter()
        .map(|spec| {
            (
                spec.column.clone(),
                Value::Num(aggregate(spec, rows, row_indices)),
            )
        })
        .collect()
}
