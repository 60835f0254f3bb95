// ============================================================
// QUALITY REPORT TYPES
// ============================================================
// Derived, ephemeral structures produced by the quality audit

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::dataset::ColumnType;

/// Complete data-quality report for the loaded dataset.
/// Recomputed fresh on every request, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub generated_at: DateTime<Utc>,
    pub dataset_info: DatasetInfo,
    pub duplicates: DuplicateCheck,
    pub missing: MissingCheck,
    pub outliers: OutlierCheck,
    pub summary: QualitySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateCheck {
    /// Rows identical to an earlier row, field by field
    pub exact_duplicates: usize,
    pub percentage: f64,
    /// Indices of the first few duplicate rows (at most 10)
    pub duplicate_row_indices: Vec<usize>,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingCheck {
    pub total_missing_cells: usize,
    pub total_cells: usize,
    pub overall_missing_percentage: f64,
    pub columns_with_missing: usize,
    /// Only columns that actually have missing cells appear here
    pub by_column: HashMap<String, ColumnMissing>,
    /// Columns above the 20% missingness threshold
    pub high_missing_columns: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub missing_count: usize,
    pub missing_percentage: f64,
    pub severity: MissingSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSeverity {
    /// More than 20% missing
    High,
    /// More than 5% missing
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierCheck {
    pub columns_with_outliers: usize,
    /// Only continuous columns with at least one outlier appear here
    pub by_column: HashMap<String, ColumnOutliers>,
    pub total_outlier_values: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutliers {
    pub count: usize,
    /// Percentage of the column's valid (non-missing numeric) values
    pub percentage: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Up to five offending values, in row order
    pub sample_values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySummary {
    pub total_issues: usize,
    pub critical_issues: usize,
    /// Clamped to [0, 100]
    pub quality_score: u8,
    pub recommendation: Recommendation,
}

/// Qualitative reading of the quality score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Score above 80
    ReadyForAnalysis,
    /// Score above 50
    AddressIssuesFirst,
    /// Everything else
    CleanBeforeProceeding,
}

impl Recommendation {
    pub fn from_score(score: u8) -> Self {
        if score > 80 {
            Recommendation::ReadyForAnalysis
        } else if score > 50 {
            Recommendation::AddressIssuesFirst
        } else {
            Recommendation::CleanBeforeProceeding
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Recommendation::ReadyForAnalysis => {
                "Data quality is good. Proceed with analysis."
            }
            Recommendation::AddressIssuesFirst => {
                "Address the flagged issues before running analyses."
            }
            Recommendation::CleanBeforeProceeding => {
                "Significant quality issues found. Clean the data before proceeding."
            }
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Auto-generated data dictionary for the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDictionary {
    pub generated_at: DateTime<Utc>,
    pub variables: Vec<DictionaryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub variable_name: String,
    pub variable_type: ColumnType,
    pub n_total: usize,
    pub n_valid: usize,
    pub n_missing: usize,
    pub missing_percentage: f64,
    pub unique_values: usize,
    /// Present for numeric variables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    /// Present for non-numeric variables (at most 20 listed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}
