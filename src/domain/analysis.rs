// ============================================================
// ANALYSIS RESULT TYPES
// ============================================================
// Output of one statistical test invocation

use serde::{Deserialize, Serialize};

/// Result of a single analysis run.
///
/// Always well-formed: insufficient data or an unsupported analysis type
/// produce a result whose text explains the shortfall, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Analysis-type tag as requested (e.g. "correlation")
    pub analysis_type: String,

    /// One-line human-readable summary
    pub summary: String,

    /// Raw fixed-width statistical output
    pub raw_output: String,

    /// Plain-English interpretation
    pub interpretation: String,

    /// APA-style reporting fragment
    pub apa_text: String,

    /// Structured numeric payload, when the analysis computed one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<AnalysisPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisPayload {
    Correlation {
        variables: Vec<String>,
        /// Symmetric matrix in `variables` order, unit diagonal
        matrix: Vec<Vec<f64>>,
        pairs: Vec<CorrelationPair>,
    },
    Regression {
        dependent: String,
        predictor: String,
        n: usize,
        slope: f64,
        intercept: f64,
        r: f64,
        r_squared: f64,
        adj_r_squared: f64,
        rmse: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub var_a: String,
    pub var_b: String,
    pub r: f64,
    pub strength: Strength,
    pub direction: Direction,
}

/// Relationship strength by |r|: strong > .7, moderate > .4, weak otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

impl Strength {
    pub fn from_r(r: f64) -> Self {
        let abs = r.abs();
        if abs > 0.7 {
            Strength::Strong
        } else if abs > 0.4 {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strength::Strong => write!(f, "strong"),
            Strength::Moderate => write!(f, "moderate"),
            Strength::Weak => write!(f, "weak"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn from_r(r: f64) -> Self {
        if r < 0.0 {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Positive => write!(f, "positive"),
            Direction::Negative => write!(f, "negative"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(Strength::from_r(0.71), Strength::Strong);
        assert_eq!(Strength::from_r(-0.9), Strength::Strong);
        assert_eq!(Strength::from_r(0.7), Strength::Moderate);
        assert_eq!(Strength::from_r(0.41), Strength::Moderate);
        assert_eq!(Strength::from_r(0.4), Strength::Weak);
        assert_eq!(Strength::from_r(0.0), Strength::Weak);
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(Direction::from_r(0.2), Direction::Positive);
        assert_eq!(Direction::from_r(-0.2), Direction::Negative);
    }
}
