// ============================================================
// RELIABILITY USE CASE
// ============================================================
// Cronbach's alpha for multi-item scales

use crate::domain::dataset::Dataset;
use crate::domain::reliability::{interpret_alpha, ItemStatistics, ReliabilityReport};
use crate::shared::stats;

/// Item-total correlation below which an item is flagged
const LOW_ITEM_TOTAL_R: f64 = 0.3;

/// Alpha improvement that makes deleting an item worth mentioning
const ALPHA_GAIN_THRESHOLD: f64 = 0.05;

/// Internal-consistency analysis use case
#[derive(Debug, Default)]
pub struct ReliabilityUseCase;

impl ReliabilityUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Analyze the named item columns as one scale.
    ///
    /// Rows missing any item are removed (listwise deletion). Degenerate
    /// inputs yield a report with `cronbachs_alpha: None` rather than an
    /// error.
    pub fn run(&self, dataset: &Dataset, items: &[String], scale_name: Option<&str>) -> ReliabilityReport {
        let scale_name = scale_name.unwrap_or("Scale").to_string();

        // Item columns in selection order; unknown columns are dropped
        let items: Vec<&String> = items
            .iter()
            .filter(|name| dataset.columns.contains(name))
            .collect();

        let cases = self.complete_cases(dataset, &items);
        let n_valid_cases = cases.first().map(|c| c.len()).unwrap_or(0);

        let alpha = cronbachs_alpha(&cases);

        let mut item_statistics = Vec::with_capacity(items.len());
        let mut recommendations = Vec::new();

        for (idx, item) in items.iter().enumerate() {
            let series = &cases[idx];

            let item_total_r = item_total_correlation(&cases, idx);
            let alpha_if_deleted = alpha_without_item(&cases, idx);

            if let Some(r) = item_total_r {
                if r < LOW_ITEM_TOTAL_R {
                    recommendations.push(format!(
                        "Consider removing '{}' (low item-total correlation: {:.2})",
                        item, r
                    ));
                }
            }
            if let (Some(current), Some(without)) = (alpha, alpha_if_deleted) {
                if without > current + ALPHA_GAIN_THRESHOLD {
                    recommendations.push(format!(
                        "Removing '{}' would improve alpha from {:.2} to {:.2}",
                        item, current, without
                    ));
                }
            }

            item_statistics.push(ItemStatistics {
                item: (*item).clone(),
                mean: stats::round_to(stats::mean(series), 4),
                std_dev: stats::round_to(stats::sample_std(series), 4),
                item_total_r: item_total_r.map(|r| stats::round_to(r, 4)),
                alpha_if_deleted: alpha_if_deleted.map(|a| stats::round_to(a, 4)),
            });
        }

        if recommendations.is_empty() && alpha.is_some() {
            recommendations
                .push("Scale reliability is adequate. No items need removal.".to_string());
        }

        ReliabilityReport {
            scale_name,
            n_items: items.len(),
            n_valid_cases,
            cronbachs_alpha: alpha.map(|a| stats::round_to(a, 4)),
            interpretation: interpret_alpha(alpha).to_string(),
            item_statistics,
            recommendations,
        }
    }

    /// Column-major matrix of listwise-complete observations
    fn complete_cases(&self, dataset: &Dataset, items: &[&String]) -> Vec<Vec<f64>> {
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); items.len()];

        'rows: for row in 0..dataset.row_count() {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match dataset.cell(row, item).as_number() {
                    Some(v) => values.push(v),
                    None => continue 'rows,
                }
            }
            for (idx, v) in values.into_iter().enumerate() {
                columns[idx].push(v);
            }
        }

        columns
    }
}

/// Cronbach's alpha over column-major items.
/// None when fewer than 2 items, fewer than 2 cases, or zero total variance.
fn cronbachs_alpha(items: &[Vec<f64>]) -> Option<f64> {
    let k = items.len();
    if k < 2 {
        return None;
    }
    let n = items[0].len();
    if n < 2 {
        return None;
    }

    let item_variance_sum: f64 = items.iter().map(|col| stats::sample_variance(col)).sum();

    let totals: Vec<f64> = (0..n)
        .map(|row| items.iter().map(|col| col[row]).sum())
        .collect();
    let total_variance = stats::sample_variance(&totals);

    if total_variance == 0.0 {
        return None;
    }

    Some(k as f64 / (k as f64 - 1.0) * (1.0 - item_variance_sum / total_variance))
}

/// Corrected item-total correlation: the item against the sum of the
/// remaining items
fn item_total_correlation(items: &[Vec<f64>], index: usize) -> Option<f64> {
    let n = items.get(index)?.len();
    if n < 2 || items.len() < 2 {
        return None;
    }

    let rest_totals: Vec<f64> = (0..n)
        .map(|row| {
            items
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, col)| col[row])
                .sum()
        })
        .collect();

    let r = stats::pearson(&items[index], &rest_totals);
    Some(r)
}

fn alpha_without_item(items: &[Vec<f64>], index: usize) -> Option<f64> {
    if items.len() < 3 {
        return None;
    }
    let remaining: Vec<Vec<f64>> = items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, col)| col.clone())
        .collect();
    cronbachs_alpha(&remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::type_inference::infer_column_types;
    use crate::infrastructure::parsers::CsvTableParser;

    fn dataset_from_csv(content: &str) -> Dataset {
        let table = CsvTableParser::new().parse_content(content).unwrap();
        let types = infer_column_types(&table.columns, &table.rows);
        Dataset::new("scale.csv".to_string(), table.columns, table.rows, types)
    }

    /// Three items moving together, yielding a high alpha
    fn consistent_scale() -> Dataset {
        dataset_from_csv(
            "q1,q2,q3\n\
             1,2,1\n\
             2,3,2\n\
             3,4,3\n\
             4,5,4\n\
             5,6,5\n\
             2,2,2\n\
             4,4,4\n\
             3,3,3",
        )
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_consistent_items_score_high_alpha() {
        let report = ReliabilityUseCase::new().run(
            &consistent_scale(),
            &names(&["q1", "q2", "q3"]),
            Some("Wellbeing"),
        );

        assert_eq!(report.scale_name, "Wellbeing");
        assert_eq!(report.n_items, 3);
        assert_eq!(report.n_valid_cases, 8);

        let alpha = report.cronbachs_alpha.expect("alpha should be defined");
        assert!(alpha > 0.9, "alpha was {}", alpha);
        assert_eq!(report.interpretation, "Excellent");
        assert_eq!(report.item_statistics.len(), 3);
    }

    #[test]
    fn test_single_item_yields_no_alpha() {
        let report =
            ReliabilityUseCase::new().run(&consistent_scale(), &names(&["q1"]), None);

        assert_eq!(report.cronbachs_alpha, None);
        assert_eq!(report.interpretation, "Could not calculate");
    }

    #[test]
    fn test_rows_with_missing_items_are_dropped() {
        let dataset = dataset_from_csv(
            "q1,q2\n\
             1,2\n\
             2,\n\
             3,4\n\
             4,5",
        );
        let report = ReliabilityUseCase::new().run(&dataset, &names(&["q1", "q2"]), None);
        assert_eq!(report.n_valid_cases, 3);
    }

    #[test]
    fn test_alpha_formula_on_known_matrix() {
        // Two items with equal variance v and covariance c:
        // alpha = 2c / (v + c)
        let items = vec![vec![1.0, 2.0, 3.0, 4.0], vec![1.0, 2.0, 3.0, 4.0]];
        let alpha = cronbachs_alpha(&items).unwrap();
        assert!((alpha - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_total_variance_yields_none() {
        // Items perfectly cancel: total score is constant
        let items = vec![vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0]];
        assert_eq!(cronbachs_alpha(&items), None);
    }

    #[test]
    fn test_inconsistent_item_is_flagged() {
        // q3 runs against the other two items
        let dataset = dataset_from_csv(
            "q1,q2,q3\n\
             1,1,5\n\
             2,2,4\n\
             3,3,3\n\
             4,4,2\n\
             5,5,1\n\
             1,2,5\n\
             5,4,2\n\
             2,1,4",
        );
        let report =
            ReliabilityUseCase::new().run(&dataset, &names(&["q1", "q2", "q3"]), None);

        let q3 = &report.item_statistics[2];
        assert!(q3.item_total_r.unwrap() < 0.0);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("q3")));
    }
}
