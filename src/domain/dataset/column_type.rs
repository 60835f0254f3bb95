// ============================================================
// COLUMN TYPE ENUM
// ============================================================
// Inferred semantic type of a column, driving which statistics apply

use serde::{Deserialize, Serialize};

/// Semantic type inferred for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Numeric with enough distinct values for interval statistics
    Continuous,

    /// Discrete labels (or low-cardinality numerics)
    Categorical,

    /// Exactly two distinct values
    Binary,
}

impl ColumnType {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ColumnType::Continuous => {
                "Numeric variable summarized with means and dispersion"
            }
            ColumnType::Categorical => {
                "Discrete variable summarized with frequency tables"
            }
            ColumnType::Binary => "Two-level variable",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Continuous => write!(f, "continuous"),
            ColumnType::Categorical => write!(f, "categorical"),
            ColumnType::Binary => write!(f, "binary"),
        }
    }
}
