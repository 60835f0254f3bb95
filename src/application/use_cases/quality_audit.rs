// ============================================================
// QUALITY AUDIT USE CASE
// ============================================================
// Duplicates, missing data, IQR outliers, composite quality score

use std::collections::{HashMap, HashSet};

use chrono::Utc;

use crate::domain::dataset::Dataset;
use crate::domain::quality::{
    ColumnMissing, ColumnOutliers, DataDictionary, DatasetInfo, DictionaryEntry, DuplicateCheck,
    MissingCheck, MissingSeverity, OutlierCheck, QualityReport, QualitySummary, Recommendation,
};
use crate::shared::stats;

/// Missing-fraction above which a column counts as high-missing
const HIGH_MISSING_THRESHOLD: f64 = 20.0;

/// Duplicate-fraction above which duplication is a critical issue
const CRITICAL_DUPLICATE_THRESHOLD: f64 = 10.0;

/// Minimum valid values before the IQR rule is applied to a column
const MIN_OUTLIER_SAMPLE: usize = 4;

/// Data quality audit use case.
/// Pure read: produces a fresh report, never touches the dataset.
#[derive(Debug, Default)]
pub struct QualityAuditUseCase;

impl QualityAuditUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Run the full audit and score the result
    pub fn run(&self, dataset: &Dataset) -> QualityReport {
        let duplicates = self.check_duplicates(dataset);
        let missing = self.check_missing(dataset);
        let outliers = self.check_outliers(dataset);
        let summary = self.summarize(&duplicates, &missing, &outliers, dataset.row_count());

        tracing::debug!(
            dataset_id = %dataset.id,
            score = summary.quality_score,
            "Quality audit complete"
        );

        QualityReport {
            generated_at: Utc::now(),
            dataset_info: DatasetInfo {
                rows: dataset.row_count(),
                columns: dataset.column_count(),
                column_names: dataset.columns.clone(),
            },
            duplicates,
            missing,
            outliers,
            summary,
        }
    }

    /// Exact duplicates: field-by-field serialization in column order
    fn check_duplicates(&self, dataset: &Dataset) -> DuplicateCheck {
        let mut seen: HashSet<String> = HashSet::with_capacity(dataset.row_count());
        let mut duplicate_row_indices = Vec::new();
        let mut exact_duplicates = 0usize;

        for row in 0..dataset.row_count() {
            if seen.insert(Self::row_key(dataset, row)) {
                continue;
            }
            exact_duplicates += 1;
            if duplicate_row_indices.len() < 10 {
                duplicate_row_indices.push(row);
            }
        }

        let percentage = if dataset.row_count() > 0 {
            stats::round_to(
                exact_duplicates as f64 / dataset.row_count() as f64 * 100.0,
                2,
            )
        } else {
            0.0
        };

        DuplicateCheck {
            exact_duplicates,
            percentage,
            duplicate_row_indices,
            suggestion: (exact_duplicates > 0)
                .then(|| "Consider removing duplicate rows".to_string()),
        }
    }

    /// Canonical serialization of a row, sensitive to column order
    fn row_key(dataset: &Dataset, row: usize) -> String {
        let mut key = String::new();
        for column in &dataset.columns {
            match dataset.cell(row, column).distinct_key() {
                Some(k) => key.push_str(&k),
                None => key.push('\u{0}'),
            }
            key.push('\u{1f}');
        }
        key
    }

    fn check_missing(&self, dataset: &Dataset) -> MissingCheck {
        let n_rows = dataset.row_count();
        let mut by_column = HashMap::new();
        let mut high_missing_columns = Vec::new();
        let mut suggestions = Vec::new();
        let mut total_missing_cells = 0usize;
        let mut columns_with_missing = 0usize;

        for column in &dataset.columns {
            let missing_count = dataset
                .column_values(column)
                .filter(|v| v.is_missing())
                .count();
            total_missing_cells += missing_count;

            if missing_count == 0 {
                continue;
            }
            columns_with_missing += 1;

            let pct = if n_rows > 0 {
                stats::round_to(missing_count as f64 / n_rows as f64 * 100.0, 2)
            } else {
                0.0
            };

            let severity = if pct > HIGH_MISSING_THRESHOLD {
                MissingSeverity::High
            } else if pct > 5.0 {
                MissingSeverity::Medium
            } else {
                MissingSeverity::Low
            };

            if pct > HIGH_MISSING_THRESHOLD {
                high_missing_columns.push(column.clone());
            }

            suggestions.push(if pct > 50.0 {
                format!("Consider dropping column '{}' ({:.1}% missing)", column, pct)
            } else if pct > HIGH_MISSING_THRESHOLD {
                format!(
                    "Column '{}' has high missingness ({:.1}%). Consider imputation",
                    column, pct
                )
            } else if pct > 5.0 {
                format!("Column '{}' has moderate missingness ({:.1}%)", column, pct)
            } else {
                format!("Column '{}' has low missingness ({:.1}%)", column, pct)
            });

            by_column.insert(
                column.clone(),
                ColumnMissing {
                    missing_count,
                    missing_percentage: pct,
                    severity,
                },
            );
        }

        let total_cells = n_rows * dataset.column_count();
        let overall_missing_percentage = if total_cells > 0 {
            stats::round_to(total_missing_cells as f64 / total_cells as f64 * 100.0, 2)
        } else {
            0.0
        };

        MissingCheck {
            total_missing_cells,
            total_cells,
            overall_missing_percentage,
            columns_with_missing,
            by_column,
            high_missing_columns,
            suggestions,
        }
    }

    /// Tukey IQR fences over continuous columns.
    /// Columns with fewer than 4 valid values are skipped; zero-outlier
    /// columns do not appear in the breakdown.
    fn check_outliers(&self, dataset: &Dataset) -> OutlierCheck {
        let mut by_column = HashMap::new();
        let mut total_outlier_values = 0usize;

        for column in dataset.columns_of_type(crate::domain::dataset::ColumnType::Continuous) {
            let values = dataset.numeric_values(column);
            if values.len() < MIN_OUTLIER_SAMPLE {
                continue;
            }

            let q1 = stats::percentile(&values, 25.0);
            let q3 = stats::percentile(&values, 75.0);
            let iqr = q3 - q1;
            let lower_bound = q1 - 1.5 * iqr;
            let upper_bound = q3 + 1.5 * iqr;

            let outliers: Vec<f64> = values
                .iter()
                .copied()
                .filter(|v| *v < lower_bound || *v > upper_bound)
                .collect();

            if outliers.is_empty() {
                continue;
            }

            total_outlier_values += outliers.len();
            by_column.insert(
                column.to_string(),
                ColumnOutliers {
                    count: outliers.len(),
                    percentage: stats::round_to(
                        outliers.len() as f64 / values.len() as f64 * 100.0,
                        2,
                    ),
                    lower_bound: stats::round_to(lower_bound, 4),
                    upper_bound: stats::round_to(upper_bound, 4),
                    sample_values: outliers.into_iter().take(5).collect(),
                },
            );
        }

        OutlierCheck {
            columns_with_outliers: by_column.len(),
            by_column,
            total_outlier_values,
        }
    }

    /// Composite score: 100 minus capped penalties for missingness,
    /// duplication, and outlier-affected columns, clamped to [0, 100]
    fn summarize(
        &self,
        duplicates: &DuplicateCheck,
        missing: &MissingCheck,
        outliers: &OutlierCheck,
        n_rows: usize,
    ) -> QualitySummary {
        let missing_penalty = (missing.overall_missing_percentage * 2.0).min(40.0);
        let duplicate_penalty = (duplicates.percentage * 3.0).min(30.0);
        let outlier_penalty = (outliers.columns_with_outliers as f64 * 2.0).min(20.0);

        let quality_score = (100.0 - missing_penalty - duplicate_penalty - outlier_penalty)
            .max(0.0)
            .round() as u8;

        let total_issues = missing.high_missing_columns.len()
            + usize::from(duplicates.exact_duplicates > 0)
            + outliers.columns_with_outliers;

        let duplicates_critical = n_rows > 0
            && duplicates.exact_duplicates as f64 > n_rows as f64 * CRITICAL_DUPLICATE_THRESHOLD / 100.0;
        let critical_issues =
            missing.high_missing_columns.len() + usize::from(duplicates_critical);

        QualitySummary {
            total_issues,
            critical_issues,
            quality_score,
            recommendation: Recommendation::from_score(quality_score),
        }
    }

    /// Auto-generate a data dictionary for the loaded dataset
    pub fn data_dictionary(&self, dataset: &Dataset) -> DataDictionary {
        let n_total = dataset.row_count();
        let variables = dataset
            .columns
            .iter()
            .map(|column| {
                let n_missing = dataset
                    .column_values(column)
                    .filter(|v| v.is_missing())
                    .count();
                let n_valid = n_total - n_missing;

                let distinct: HashSet<String> = dataset
                    .column_values(column)
                    .filter_map(|v| v.distinct_key())
                    .collect();

                let numeric = dataset.numeric_values(column);
                let all_numeric = n_valid > 0 && numeric.len() == n_valid;

                let (min, max, mean, categories) = if all_numeric {
                    let min = numeric.iter().copied().fold(f64::INFINITY, f64::min);
                    let max = numeric.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    (
                        Some(stats::round_to(min, 4)),
                        Some(stats::round_to(max, 4)),
                        Some(stats::round_to(stats::mean(&numeric), 4)),
                        None,
                    )
                } else {
                    let mut labels = Vec::new();
                    let mut seen = HashSet::new();
                    for value in dataset.column_values(column) {
                        if let Some(label) = value.label() {
                            if seen.insert(label.clone()) {
                                labels.push(label);
                            }
                        }
                        if labels.len() >= 20 {
                            break;
                        }
                    }
                    (None, None, None, Some(labels))
                };

                DictionaryEntry {
                    variable_name: column.clone(),
                    variable_type: dataset
                        .column_type(column)
                        .unwrap_or(crate::domain::dataset::ColumnType::Categorical),
                    n_total,
                    n_valid,
                    n_missing,
                    missing_percentage: if n_total > 0 {
                        stats::round_to(n_missing as f64 / n_total as f64 * 100.0, 2)
                    } else {
                        0.0
                    },
                    unique_values: distinct.len(),
                    min,
                    max,
                    mean,
                    categories,
                }
            })
            .collect();

        DataDictionary {
            generated_at: Utc::now(),
            variables,
        }
    }
}
