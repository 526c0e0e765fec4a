//! Threshold filtering of sample/gene combinations.

use crate::analysis::utils::{percentage, round_to};
use crate::analysis::validation::validate_genes;
use crate::config::ROUND_DECIMALS;
use crate::data::{ExpressionStore, Status};
use crate::error::Result;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A sample whose expression exceeded the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdMatch {
    pub sample_id: String,
    pub status: Status,
    /// Expression value rounded to three decimals
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdMatches {
    /// Matching samples in file row order
    pub matches: Vec<ThresholdMatch>,
    /// Percentage of matches with CASE status, rounded to three decimals
    pub case_percentage: f64,
}

/// Filtering outcome for one gene.
#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdOutcome {
    /// No sample exceeded the threshold
    Empty,
    Filtered(ThresholdMatches),
}

impl ThresholdOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, ThresholdOutcome::Empty)
    }
}

/// Samples whose expression is strictly above `threshold`, per gene.
///
/// With an empty `genes` slice every catalog gene is scanned. Otherwise names
/// are deduplicated and validated first, and an unknown name fails the whole
/// call.
pub fn expression_above_threshold<S>(
    store: &ExpressionStore,
    threshold: f64,
    genes: &[S],
) -> Result<BTreeMap<String, ThresholdOutcome>>
where
    S: AsRef<str>,
{
    let scope: Vec<&str> = if genes.is_empty() {
        warn!(
            genes = store.n_genes(),
            samples = store.n_samples(),
            "no genes given, scanning the whole catalog"
        );
        store.gene_catalog().iter().map(String::as_str).collect()
    } else {
        validate_genes(store, genes)?
    };
    debug!(genes = scope.len(), threshold, "filtering expression above threshold");

    let results = scope
        .into_iter()
        .map(|gene| (gene.to_string(), filter_gene(store, gene, threshold)))
        .collect();

    Ok(results)
}

fn filter_gene(store: &ExpressionStore, gene: &str, threshold: f64) -> ThresholdOutcome {
    let matches: Vec<ThresholdMatch> = store
        .series_for(gene)
        .filter(|record| record.value > threshold)
        .map(|record| ThresholdMatch {
            sample_id: record.sample_id.to_string(),
            status: record.status,
            value: round_to(record.value, ROUND_DECIMALS),
        })
        .collect();

    if matches.is_empty() {
        return ThresholdOutcome::Empty;
    }

    let case_count = matches
        .iter()
        .filter(|m| m.status == Status::Case)
        .count();
    let case_percentage = round_to(percentage(case_count, matches.len()), ROUND_DECIMALS);

    ThresholdOutcome::Filtered(ThresholdMatches {
        matches,
        case_percentage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpressionError;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn create_test_store() -> ExpressionStore {
        ExpressionStore::new(
            vec!["G1".to_string(), "G2".to_string()],
            vec!["S1".into(), "S2".into(), "S3".into()],
            vec![Status::Normal, Status::Case, Status::Case],
            array![[5.12345, 0.1], [1.0, 0.2], [7.00049, 0.3]],
        )
        .unwrap()
    }

    #[test]
    fn test_matches_keep_row_order_and_round() {
        let store = create_test_store();
        let results = expression_above_threshold(&store, 2.0, &["G1"]).unwrap();

        let ThresholdOutcome::Filtered(filtered) = &results["G1"] else {
            panic!("expected matches for G1");
        };
        let ids: Vec<&str> = filtered.matches.iter().map(|m| m.sample_id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S3"]);
        assert_abs_diff_eq!(filtered.matches[0].value, 5.123);
        assert_abs_diff_eq!(filtered.matches[1].value, 7.0);
        assert_abs_diff_eq!(filtered.case_percentage, 50.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let store = create_test_store();
        let results = expression_above_threshold(&store, 0.3, &["G2"]).unwrap();
        assert_eq!(results["G2"], ThresholdOutcome::Empty);
    }

    #[test]
    fn test_percentage_is_rounded() {
        let store = create_test_store();
        let results = expression_above_threshold(&store, 0.0, &["G1"]).unwrap();
        let ThresholdOutcome::Filtered(filtered) = &results["G1"] else {
            panic!("expected matches for G1");
        };
        assert_abs_diff_eq!(filtered.case_percentage, 66.667);
    }

    #[test]
    fn test_huge_values_are_reported_unchanged() {
        let store = ExpressionStore::new(
            vec!["G1".to_string()],
            vec!["S1".into()],
            vec![Status::Case],
            array![[1e306]],
        )
        .unwrap();

        let results = expression_above_threshold(&store, 0.0, &["G1"]).unwrap();
        let ThresholdOutcome::Filtered(filtered) = &results["G1"] else {
            panic!("expected matches for G1");
        };
        assert!(filtered.matches[0].value.is_finite());
        assert_eq!(filtered.matches[0].value, 1e306);
    }

    #[test]
    fn test_empty_scope_scans_catalog() {
        let store = create_test_store();
        let genes: [&str; 0] = [];
        let results = expression_above_threshold(&store, 0.15, &genes).unwrap();

        assert_eq!(results.len(), 2);
        assert!(!results["G1"].is_empty());
        assert!(!results["G2"].is_empty());
    }

    #[test]
    fn test_unknown_gene_fails_whole_call() {
        let store = create_test_store();
        let err = expression_above_threshold(&store, 0.0, &["G1", "GX"]).unwrap_err();
        assert!(matches!(err, ExpressionError::UnknownGene(name) if name == "GX"));
    }
}
