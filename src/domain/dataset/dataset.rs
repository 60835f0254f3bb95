// ============================================================
// DATASET
// ============================================================
// The rectangular in-memory table currently loaded for analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::{CellValue, ColumnType};

static MISSING_CELL: CellValue = CellValue::Missing;

/// A fully materialized, rectangular dataset.
///
/// Rows are maps from column name to cell value; a column absent from a row
/// reads as `Missing`, never as an error. `columns` is the authoritative
/// order for every column-sensitive operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Unique dataset id
    pub id: String,

    /// Original filename the dataset was imported from
    pub source_name: String,

    /// Import timestamp
    pub created_at: DateTime<Utc>,

    /// Ordered column names from the source header
    pub columns: Vec<String>,

    /// Row records in source order
    pub rows: Vec<HashMap<String, CellValue>>,

    /// Inferred semantic type per column
    pub column_types: HashMap<String, ColumnType>,
}

/// Lightweight dataset metadata for interface responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub id: String,
    pub source_name: String,
    pub created_at: DateTime<Utc>,
    pub row_count: usize,
    pub column_count: usize,
    pub column_names: Vec<String>,
    pub column_types: HashMap<String, ColumnType>,
}

impl Dataset {
    /// Create a new dataset with a fresh id and timestamp
    pub fn new(
        source_name: String,
        columns: Vec<String>,
        rows: Vec<HashMap<String, CellValue>>,
        column_types: HashMap<String, ColumnType>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source_name,
            created_at: Utc::now(),
            columns,
            rows,
            column_types,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Cell at (row, column); absent keys read as missing
    pub fn cell(&self, row: usize, column: &str) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&MISSING_CELL)
    }

    /// All values of a column, in row order (missing for absent keys)
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> {
        self.rows
            .iter()
            .map(move |row| row.get(column).unwrap_or(&MISSING_CELL))
    }

    /// Non-missing numeric values of a column, in row order
    pub fn numeric_values(&self, column: &str) -> Vec<f64> {
        self.column_values(column)
            .filter_map(|v| v.as_number())
            .collect()
    }

    /// Paired numeric observations for two columns.
    ///
    /// Pairs by original row index and drops a row when either value is
    /// non-numeric, so differing missingness cannot misalign the series.
    pub fn paired_numeric(&self, x: &str, y: &str) -> (Vec<f64>, Vec<f64>) {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for row in 0..self.rows.len() {
            if let (Some(xv), Some(yv)) = (
                self.cell(row, x).as_number(),
                self.cell(row, y).as_number(),
            ) {
                xs.push(xv);
                ys.push(yv);
            }
        }
        (xs, ys)
    }

    /// Inferred type of a column, if the column exists
    pub fn column_type(&self, column: &str) -> Option<ColumnType> {
        self.column_types.get(column).copied()
    }

    /// Columns of the given type, in source column order
    pub fn columns_of_type(&self, column_type: ColumnType) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| self.column_type(c) == Some(column_type))
            .map(|c| c.as_str())
            .collect()
    }

    pub fn meta(&self) -> DatasetMeta {
        DatasetMeta {
            id: self.id.clone(),
            source_name: self.source_name.clone(),
            created_at: self.created_at,
            row_count: self.row_count(),
            column_count: self.column_count(),
            column_names: self.columns.clone(),
            column_types: self.column_types.clone(),
        }
    }
}
