// ============================================================
// DESCRIPTIVE STATISTICS TYPES
// ============================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-column summary statistics for the loaded dataset.
///
/// Continuous columns get interval statistics; categorical and binary
/// columns get frequency tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub continuous: BTreeMap<String, ContinuousSummary>,
    pub categorical: BTreeMap<String, CategoricalSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousSummary {
    /// Count of valid (non-missing numeric) values
    pub n: usize,
    pub missing: usize,
    pub missing_percentage: f64,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub min: f64,
    pub max: f64,
    /// Fisher-Pearson adjusted skewness; 0 when the deviation is 0 or n < 3
    pub skewness: f64,
    /// Adjusted excess kurtosis; 0 when the deviation is 0 or n < 4
    pub kurtosis: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// Count of non-missing values
    pub n: usize,
    pub missing: usize,
    pub missing_percentage: f64,
    pub unique_values: usize,
    /// Sorted by descending count; ties keep first-appearance order
    pub categories: Vec<CategoryCount>,
    /// Categories observed fewer than 5 times
    pub sparse_categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub n: usize,
    /// Percentage of the column's non-missing values
    pub percentage: f64,
}

impl DescriptiveStats {
    pub fn is_empty(&self) -> bool {
        self.continuous.is_empty() && self.categorical.is_empty()
    }
}
