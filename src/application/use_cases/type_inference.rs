// ============================================================
// COLUMN TYPE INFERENCE
// ============================================================
// Cardinality and numeric-parseability heuristics

use std::collections::{HashMap, HashSet};

use crate::domain::dataset::{CellValue, ColumnType};

/// Number of distinct values below which a numeric column is treated
/// as categorical
const CATEGORICAL_DISTINCT_CEILING: usize = 10;

/// Distinct-to-valid ratio below which a numeric column is treated
/// as categorical
const CATEGORICAL_DISTINCT_RATIO: f64 = 0.10;

/// Infer a semantic type for every column.
///
/// Inference is deterministic: the same column always yields the same type.
pub fn infer_column_types(
    columns: &[String],
    rows: &[HashMap<String, CellValue>],
) -> HashMap<String, ColumnType> {
    columns
        .iter()
        .map(|column| {
            let values: Vec<&CellValue> = rows
                .iter()
                .filter_map(|row| row.get(column.as_str()))
                .filter(|v| !v.is_missing())
                .collect();
            (column.clone(), infer_column(&values))
        })
        .collect()
}

/// Classify one column from its non-missing values.
///
/// The binary check runs before the numeric-cardinality rule, so a numeric
/// column with exactly two distinct values is always binary.
fn infer_column(values: &[&CellValue]) -> ColumnType {
    if values.is_empty() {
        // Degenerate policy: a column with no usable values defaults
        // to categorical
        return ColumnType::Categorical;
    }

    let distinct: HashSet<String> = values.iter().filter_map(|v| v.distinct_key()).collect();

    if distinct.len() == 2 {
        return ColumnType::Binary;
    }

    let all_numeric = values.iter().all(|v| v.as_number().is_some());
    if all_numeric {
        let ratio = distinct.len() as f64 / values.len() as f64;
        if distinct.len() < CATEGORICAL_DISTINCT_CEILING || ratio < CATEGORICAL_DISTINCT_RATIO {
            return ColumnType::Categorical;
        }
        return ColumnType::Continuous;
    }

    ColumnType::Categorical
}
