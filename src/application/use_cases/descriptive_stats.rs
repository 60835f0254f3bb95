// ============================================================
// DESCRIPTIVE STATISTICS USE CASE
// ============================================================
// Per-column summaries: interval statistics or frequency tables

use std::collections::{BTreeMap, HashMap};

use crate::domain::dataset::{ColumnType, Dataset};
use crate::domain::descriptives::{
    CategoricalSummary, CategoryCount, ContinuousSummary, DescriptiveStats,
};
use crate::shared::stats;

/// Categories observed fewer than this many times are flagged as sparse
const SPARSE_CATEGORY_THRESHOLD: usize = 5;

/// Descriptive statistics use case
#[derive(Debug, Default)]
pub struct DescriptiveStatsUseCase;

impl DescriptiveStatsUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Summarize the named variables, or every column when none are given.
    /// Unknown names are skipped.
    pub fn run(&self, dataset: &Dataset, variables: Option<&[String]>) -> DescriptiveStats {
        let selected: Vec<&String> = match variables {
            Some(names) => dataset
                .columns
                .iter()
                .filter(|c| names.contains(c))
                .collect(),
            None => dataset.columns.iter().collect(),
        };

        let mut continuous = BTreeMap::new();
        let mut categorical = BTreeMap::new();

        for column in selected {
            match dataset.column_type(column) {
                Some(ColumnType::Continuous) => {
                    continuous.insert(column.clone(), self.continuous_summary(dataset, column));
                }
                // Binary columns read best as frequency tables
                Some(ColumnType::Categorical) | Some(ColumnType::Binary) => {
                    categorical.insert(column.clone(), self.categorical_summary(dataset, column));
                }
                None => {}
            }
        }

        DescriptiveStats {
            continuous,
            categorical,
        }
    }

    fn continuous_summary(&self, dataset: &Dataset, column: &str) -> ContinuousSummary {
        let values = dataset.numeric_values(column);
        let n = values.len();
        let missing = dataset
            .column_values(column)
            .filter(|v| v.is_missing())
            .count();

        let mean = stats::mean(&values);
        let std_dev = stats::sample_std(&values);
        let q1 = stats::percentile(&values, 25.0);
        let q3 = stats::percentile(&values, 75.0);

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        ContinuousSummary {
            n,
            missing,
            missing_percentage: missing_pct(missing, dataset.row_count()),
            mean: stats::round_to(mean, 4),
            std_dev: stats::round_to(std_dev, 4),
            median: stats::round_to(stats::median(&values), 4),
            q1: stats::round_to(q1, 4),
            q3: stats::round_to(q3, 4),
            iqr: stats::round_to(q3 - q1, 4),
            min: if n > 0 { stats::round_to(min, 4) } else { 0.0 },
            max: if n > 0 { stats::round_to(max, 4) } else { 0.0 },
            skewness: stats::round_to(skewness(&values, mean, std_dev), 4),
            kurtosis: stats::round_to(kurtosis(&values, mean, std_dev), 4),
        }
    }

    fn categorical_summary(&self, dataset: &Dataset, column: &str) -> CategoricalSummary {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut missing = 0usize;

        for value in dataset.column_values(column) {
            match value.label() {
                Some(label) => {
                    if !counts.contains_key(&label) {
                        order.push(label.clone());
                    }
                    *counts.entry(label).or_insert(0) += 1;
                }
                None => missing += 1,
            }
        }

        let n: usize = counts.values().sum();

        // Stable sort keeps first-appearance order among tied counts
        let mut categories: Vec<CategoryCount> = order
            .iter()
            .map(|label| CategoryCount {
                category: label.clone(),
                n: counts[label],
                percentage: if n > 0 {
                    stats::round_to(counts[label] as f64 / n as f64 * 100.0, 2)
                } else {
                    0.0
                },
            })
            .collect();
        categories.sort_by(|a, b| b.n.cmp(&a.n));

        let sparse_categories = categories
            .iter()
            .filter(|c| c.n < SPARSE_CATEGORY_THRESHOLD)
            .map(|c| c.category.clone())
            .collect();

        CategoricalSummary {
            n,
            missing,
            missing_percentage: missing_pct(missing, dataset.row_count()),
            unique_values: categories.len(),
            categories,
            sparse_categories,
        }
    }
}

fn missing_pct(missing: usize, rows: usize) -> f64 {
    if rows == 0 {
        return 0.0;
    }
    stats::round_to(missing as f64 / rows as f64 * 100.0, 2)
}

/// Fisher-Pearson adjusted skewness; 0 when the deviation is 0 or n < 3
fn skewness(values: &[f64], mean: f64, std_dev: f64) -> f64 {
    let n = values.len();
    if n < 3 || std_dev == 0.0 {
        return 0.0;
    }

    let nf = n as f64;
    let sum_cubed: f64 = values
        .iter()
        .map(|v| ((v - mean) / std_dev).powi(3))
        .sum();
    nf / ((nf - 1.0) * (nf - 2.0)) * sum_cubed
}

/// Adjusted excess kurtosis; 0 when the deviation is 0 or n < 4
fn kurtosis(values: &[f64], mean: f64, std_dev: f64) -> f64 {
    let n = values.len();
    if n < 4 || std_dev == 0.0 {
        return 0.0;
    }

    let nf = n as f64;
    let sum_fourth: f64 = values
        .iter()
        .map(|v| ((v - mean) / std_dev).powi(4))
        .sum();

    nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0)) * sum_fourth
        - 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::type_inference::infer_column_types;
    use crate::infrastructure::parsers::CsvTableParser;

    fn dataset_from_csv(content: &str) -> Dataset {
        let table = CsvTableParser::new().parse_content(content).unwrap();
        let types = infer_column_types(&table.columns, &table.rows);
        Dataset::new("test.csv".to_string(), table.columns, table.rows, types)
    }

    fn continuous_fixture() -> Dataset {
        let mut csv = String::from("x\n");
        for v in 1..=12 {
            csv.push_str(&format!("{}\n", v));
        }
        dataset_from_csv(&csv)
    }

    #[test]
    fn test_continuous_summary_basics() {
        let dataset = continuous_fixture();
        let result = DescriptiveStatsUseCase::new().run(&dataset, None);
        let summary = &result.continuous["x"];

        assert_eq!(summary.n, 12);
        assert_eq!(summary.missing, 0);
        assert_eq!(summary.mean, 6.5);
        assert_eq!(summary.median, 6.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 12.0);
        // Symmetric sequence: skewness vanishes
        assert!(summary.skewness.abs() < 1e-9);
    }

    #[test]
    fn test_constant_column_has_zero_skewness() {
        // Constant numeric values: std is 0, skewness must be defined as 0
        let values = vec![5.0; 10];
        assert_eq!(skewness(&values, 5.0, 0.0), 0.0);
        assert_eq!(kurtosis(&values, 5.0, 0.0), 0.0);
    }

    #[test]
    fn test_skewness_sign_for_right_tail() {
        let values = [1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 9.0];
        let m = stats::mean(&values);
        let s = stats::sample_std(&values);
        assert!(skewness(&values, m, s) > 0.0);
    }

    #[test]
    fn test_categorical_frequency_table() {
        // Second column keeps the row with the missing color from being
        // dropped as a blank line
        let dataset = dataset_from_csv(
            "color,flag\nred,1\nblue,1\nred,1\ngreen,1\nred,1\nblue,1\n,1\nred,1",
        );
        let result = DescriptiveStatsUseCase::new().run(&dataset, None);
        let summary = &result.categorical["color"];

        assert_eq!(summary.n, 7);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.unique_values, 3);

        assert_eq!(summary.categories[0].category, "red");
        assert_eq!(summary.categories[0].n, 4);
        assert_eq!(summary.categories[1].category, "blue");
        assert_eq!(summary.categories[1].n, 2);
        assert_eq!(summary.categories[2].category, "green");
        assert_eq!(summary.categories[2].n, 1);

        // All three appear fewer than 5 times
        assert_eq!(summary.sparse_categories.len(), 3);
    }

    #[test]
    fn test_tied_counts_keep_first_appearance_order() {
        let dataset = dataset_from_csv("v\nb\na\nb\na\nc");
        let result = DescriptiveStatsUseCase::new().run(&dataset, None);
        let summary = &result.categorical["v"];

        // b and a are tied at 2; b appeared first
        assert_eq!(summary.categories[0].category, "b");
        assert_eq!(summary.categories[1].category, "a");
        assert_eq!(summary.categories[2].category, "c");
    }

    #[test]
    fn test_variable_selection_restricts_output() {
        let dataset = dataset_from_csv("a,b\nred,x\nblue,y\ngreen,z");
        let result = DescriptiveStatsUseCase::new()
            .run(&dataset, Some(&["a".to_string()]));

        assert!(result.categorical.contains_key("a"));
        assert!(!result.categorical.contains_key("b"));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let dataset = continuous_fixture();
        let use_case = DescriptiveStatsUseCase::new();
        assert_eq!(use_case.run(&dataset, None), use_case.run(&dataset, None));
    }
}
