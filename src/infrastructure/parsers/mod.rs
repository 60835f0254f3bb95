// ============================================================
// TABULAR PARSER INFRASTRUCTURE
// ============================================================
// File decoding for delimited text and spreadsheets

mod csv_parser;
mod xlsx_parser;

pub use csv_parser::CsvTableParser;
pub use xlsx_parser::XlsxTableParser;

use std::collections::HashMap;

use crate::domain::dataset::CellValue;

/// Rectangular parse output: ordered column names plus row records.
/// Cells are already resolved into tagged values.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub columns: Vec<String>,
    pub rows: Vec<HashMap<String, CellValue>>,
}

impl ParsedTable {
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}
