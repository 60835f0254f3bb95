// ============================================================
// RELIABILITY REPORT TYPES
// ============================================================
// Internal-consistency analysis of a multi-item scale

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityReport {
    pub scale_name: String,
    pub n_items: usize,
    /// Rows with every item present (listwise deletion)
    pub n_valid_cases: usize,
    /// None when the coefficient is undefined for the input
    pub cronbachs_alpha: Option<f64>,
    pub interpretation: String,
    pub item_statistics: Vec<ItemStatistics>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStatistics {
    pub item: String,
    pub mean: f64,
    pub std_dev: f64,
    /// Corrected item-total correlation (item vs. total excluding the item)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_total_r: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_if_deleted: Option<f64>,
}

/// Conventional interpretation bands for Cronbach's alpha
pub fn interpret_alpha(alpha: Option<f64>) -> &'static str {
    match alpha {
        None => "Could not calculate",
        Some(a) if a >= 0.9 => "Excellent",
        Some(a) if a >= 0.8 => "Good",
        Some(a) if a >= 0.7 => "Acceptable",
        Some(a) if a >= 0.6 => "Questionable",
        Some(a) if a >= 0.5 => "Poor",
        Some(_) => "Unacceptable",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_bands() {
        assert_eq!(interpret_alpha(Some(0.95)), "Excellent");
        assert_eq!(interpret_alpha(Some(0.85)), "Good");
        assert_eq!(interpret_alpha(Some(0.75)), "Acceptable");
        assert_eq!(interpret_alpha(Some(0.65)), "Questionable");
        assert_eq!(interpret_alpha(Some(0.55)), "Poor");
        assert_eq!(interpret_alpha(Some(0.2)), "Unacceptable");
        assert_eq!(interpret_alpha(None), "Could not calculate");
    }
}
