// ============================================================
// CELL VALUE
// ============================================================
// Tagged scalar produced by the tabular parsers

use serde::{Deserialize, Serialize};

/// A single cell of an imported table.
///
/// Parsing resolves each raw cell into one of these variants exactly once;
/// downstream code never re-sniffs types from strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Numeric value (integers are widened to f64)
    Number(f64),

    /// Boolean value
    Bool(bool),

    /// Free-text value
    Text(String),

    /// Absent cell (serialized as null)
    Missing,
}

impl CellValue {
    /// Resolve a raw string cell into a typed value.
    ///
    /// Empty or whitespace-only input becomes `Missing`; numeric strings
    /// (optionally with thousands separators) become `Number`; `true`/`false`
    /// become `Bool`; everything else stays `Text`.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Missing;
        }

        // f64::parse accepts "NaN"/"inf"; those stay text so every
        // number in a dataset is finite and JSON-serializable
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
            return CellValue::Text(raw.to_string());
        }
        if trimmed.contains(',') {
            if let Ok(n) = trimmed.replace(',', "").parse::<f64>() {
                if n.is_finite() {
                    return CellValue::Number(n);
                }
            }
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "true" => CellValue::Bool(true),
            "false" => CellValue::Bool(false),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// A cell counts as missing iff it is absent or an empty string.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric view of the cell: `Number` directly, `Text` if it parses.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<f64>()
                    .ok()
                    .or_else(|| trimmed.replace(',', "").parse::<f64>().ok())
                    .filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// Display label for frequency tables and the data dictionary.
    /// Missing cells have no label.
    pub fn label(&self) -> Option<String> {
        match self {
            CellValue::Number(n) => Some(format!("{}", n)),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            CellValue::Missing => None,
        }
    }

    /// Variant-tagged key used when counting distinct values, so that
    /// `Number(1.0)` and `Text("1")` remain distinct.
    pub fn distinct_key(&self) -> Option<String> {
        match self {
            CellValue::Number(n) => Some(format!("n:{}", n)),
            CellValue::Bool(b) => Some(format!("b:{}", b)),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(format!("t:{}", trimmed))
                }
            }
            CellValue::Missing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_numeric() {
        assert_eq!(CellValue::from_raw("42"), CellValue::Number(42.0));
        assert_eq!(CellValue::from_raw(" 3.5 "), CellValue::Number(3.5));
        assert_eq!(CellValue::from_raw("1,250"), CellValue::Number(1250.0));
    }

    #[test]
    fn test_from_raw_boolean() {
        assert_eq!(CellValue::from_raw("true"), CellValue::Bool(true));
        assert_eq!(CellValue::from_raw("FALSE"), CellValue::Bool(false));
    }

    #[test]
    fn test_from_raw_empty_is_missing() {
        assert_eq!(CellValue::from_raw(""), CellValue::Missing);
        assert_eq!(CellValue::from_raw("   "), CellValue::Missing);
    }

    #[test]
    fn test_empty_text_counts_as_missing() {
        assert!(CellValue::Text(String::new()).is_missing());
        assert!(CellValue::Missing.is_missing());
        assert!(!CellValue::Number(0.0).is_missing());
    }

    #[test]
    fn test_as_number_parses_text() {
        assert_eq!(CellValue::Text("12".into()).as_number(), Some(12.0));
        assert_eq!(CellValue::Text("abc".into()).as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
    }

    #[test]
    fn test_distinct_key_separates_variants() {
        let n = CellValue::Number(1.0).distinct_key();
        let t = CellValue::Text("1".into()).distinct_key();
        assert_ne!(n, t);
    }

    #[test]
    fn test_serializes_untagged() {
        assert_eq!(
            serde_json::to_string(&CellValue::Number(2.5)).unwrap(),
            "2.5"
        );
        assert_eq!(serde_json::to_string(&CellValue::Missing).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&CellValue::Text("a".into())).unwrap(),
            "\"a\""
        );
    }
}
