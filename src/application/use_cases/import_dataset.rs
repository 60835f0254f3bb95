// ============================================================
// IMPORT DATASET USE CASE
// ============================================================
// Dispatch on file extension, parse, infer column types

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::type_inference::infer_column_types;
use crate::domain::dataset::{ColumnType, Dataset};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::parsers::{CsvTableParser, XlsxTableParser};

/// Summary returned to the caller after a successful import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub success: bool,
    pub dataset_id: String,
    pub row_count: usize,
    pub column_count: usize,
    pub column_names: Vec<String>,
    pub column_types: HashMap<String, ColumnType>,
}

impl ImportSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            success: true,
            dataset_id: dataset.id.clone(),
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            column_names: dataset.columns.clone(),
            column_types: dataset.column_types.clone(),
        }
    }
}

/// Dataset import use case
pub struct ImportDatasetUseCase {
    /// Hard ceiling on imported rows
    max_rows: usize,
}

impl ImportDatasetUseCase {
    pub fn new(max_rows: usize) -> Self {
        Self { max_rows }
    }

    /// Import a tabular file and materialize it as a dataset.
    ///
    /// Accepted extensions: .csv, .xlsx, .xls. Anything else fails with an
    /// explicit unsupported-format error; nothing falls back silently.
    pub fn execute(&self, path: &Path) -> Result<Dataset> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let table = match extension.as_str() {
            "csv" => CsvTableParser::parse_file_auto_detect(path)?,
            "xlsx" | "xls" => XlsxTableParser::parse_file(path)?,
            "" => {
                return Err(AppError::ValidationError(
                    "File has no extension; expected .csv, .xlsx or .xls".to_string(),
                ))
            }
            other => {
                return Err(AppError::ValidationError(format!(
                    "Unsupported file format: {}",
                    other
                )))
            }
        };

        if table.rows.len() > self.max_rows {
            return Err(AppError::ValidationError(format!(
                "File has too many rows ({}), maximum allowed: {}",
                table.rows.len(),
                self.max_rows
            )));
        }

        let column_types = infer_column_types(&table.columns, &table.rows);

        let source_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("dataset")
            .to_string();

        let dataset = Dataset::new(source_name, table.columns, table.rows, column_types);

        tracing::info!(
            dataset_id = %dataset.id,
            source = %dataset.source_name,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "Imported dataset"
        );

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("datalab-import-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_clean_csv_import() {
        let path = write_temp("clean.csv", "id,score\n1,10\n2,20\n3,30\n4,40\n");
        let use_case = ImportDatasetUseCase::new(1000);
        let dataset = use_case.execute(&path).unwrap();

        assert_eq!(dataset.row_count(), 4);
        assert_eq!(dataset.column_count(), 2);
        assert_eq!(dataset.columns, vec!["id", "score"]);
        // Only 4 distinct numeric values: the cardinality rule makes
        // the column categorical, not continuous
        assert_eq!(
            dataset.column_type("score"),
            Some(ColumnType::Categorical)
        );
    }

    #[test]
    fn test_unsupported_extension_fails_without_panic() {
        let path = write_temp("notes.txt", "just some text");
        let use_case = ImportDatasetUseCase::new(1000);

        let result = use_case.execute(&path);
        match result {
            Err(AppError::ValidationError(msg)) => {
                assert!(msg.contains("Unsupported file format"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_row_ceiling_is_enforced() {
        let mut content = String::from("x\n");
        for i in 0..20 {
            content.push_str(&format!("{}\n", i));
        }
        let path = write_temp("big.csv", &content);

        let use_case = ImportDatasetUseCase::new(10);
        assert!(matches!(
            use_case.execute(&path),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_import_summary_shape() {
        let path = write_temp("summary.csv", "a,b\n1,x\n2,y\n");
        let use_case = ImportDatasetUseCase::new(1000);
        let dataset = use_case.execute(&path).unwrap();
        let summary = ImportSummary::from_dataset(&dataset);

        assert!(summary.success);
        assert_eq!(summary.row_count, 2);
        assert_eq!(summary.column_count, 2);
        assert_eq!(summary.column_names, vec!["a", "b"]);
        assert_eq!(summary.dataset_id, dataset.id);
    }
}
