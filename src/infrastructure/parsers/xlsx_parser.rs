// ============================================================
// SPREADSHEET PARSER
// ============================================================
// Excel import via calamine; first worksheet only

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};

use super::ParsedTable;
use crate::domain::dataset::CellValue;
use crate::domain::error::AppError;

/// Excel (.xlsx / .xls) parser
pub struct XlsxTableParser;

impl XlsxTableParser {
    /// Parse the first worksheet of a workbook.
    /// The first row is the header; an empty sheet yields an empty table.
    pub fn parse_file(path: &Path) -> Result<ParsedTable, AppError> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| AppError::ParseError(format!("Failed to open Excel file: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
            .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {}", e)))?;

        let mut row_iter = range.rows();

        let columns: Vec<String> = match row_iter.next() {
            Some(header_row) => header_row
                .iter()
                .enumerate()
                .map(|(idx, cell)| {
                    let label = cell
                        .as_string()
                        .map(|s| s.trim().to_string())
                        .unwrap_or_else(|| format!("{}", cell));
                    if label.is_empty() {
                        format!("column_{}", idx + 1)
                    } else {
                        label
                    }
                })
                .collect(),
            None => return Ok(ParsedTable::empty()),
        };

        let mut rows = Vec::new();
        for sheet_row in row_iter {
            let mut row = HashMap::with_capacity(columns.len());
            for (idx, column) in columns.iter().enumerate() {
                let value = sheet_row
                    .get(idx)
                    .map(Self::cell_value)
                    .unwrap_or(CellValue::Missing);
                row.insert(column.clone(), value);
            }
            rows.push(row);
        }

        Ok(ParsedTable { columns, rows })
    }

    /// Map a spreadsheet cell onto the tagged value type.
    /// Dates keep their Excel serial representation.
    fn cell_value(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Missing,
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::String(s) => CellValue::from_raw(s),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) => CellValue::Missing,
        }
    }
}
