// ============================================================
// CSV PARSER
// ============================================================
// Parse delimited-text files with encoding and delimiter detection

use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::ParsedTable;
use crate::domain::dataset::CellValue;
use crate::domain::error::AppError;

/// Delimited-text parser with encoding detection
pub struct CsvTableParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvTableParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvTableParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Parse a CSV file with automatic delimiter detection
    pub fn parse_file_auto_detect(path: &Path) -> Result<ParsedTable, AppError> {
        let content = Self::read_with_encoding_detection(path)?;
        let delimiter = Self::detect_delimiter(&content);
        Self::default().with_delimiter(delimiter).parse_content(&content)
    }

    /// Parse a CSV file and return the typed table
    pub fn parse_file(&self, path: &Path) -> Result<ParsedTable, AppError> {
        let content = Self::read_with_encoding_detection(path)?;
        self.parse_content(&content)
    }

    /// Parse CSV content from a string.
    /// The header row defines the column set; empty lines are skipped.
    pub fn parse_content(&self, content: &str) -> Result<ParsedTable, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::parse_row(&headers, &record));
        }

        Ok(ParsedTable { columns, rows })
    }

    /// Read file bytes and decode: UTF-8 first, then Windows-1252,
    /// falling back to lossy UTF-8
    fn read_with_encoding_detection(path: &Path) -> Result<String, AppError> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::IoError(format!("Failed to read file: {}", e)))?;

        if let Ok(content) = std::str::from_utf8(&bytes) {
            return Ok(content.to_string());
        }

        let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
        if !had_errors {
            return Ok(decoded.into_owned());
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Resolve one record into a typed row keyed by header name
    fn parse_row(headers: &StringRecord, record: &StringRecord) -> HashMap<String, CellValue> {
        let mut row = HashMap::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            let raw = record.get(idx).unwrap_or("");
            row.insert(header.to_string(), CellValue::from_raw(raw));
        }
        row
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe).
    /// Scored by per-line count consistency over the first lines.
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            if sample_lines.is_empty() {
                continue;
            }

            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&c| c == delimiter).count())
                .collect();

            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());
            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}
