//! Bounded selection of the most differentially expressed genes.
//!
//! Differentials are streamed one gene at a time from
//! [`per_gene_differential`] into a min-heap capped at `n` entries, so memory
//! beyond the heap stays constant regardless of catalog size.
//!
//! Ties are resolved in favour of the gene that comes first in the catalog: a
//! newcomer equal to the current minimum is discarded, the latest-inserted of
//! equal minima is evicted first, and the final ranking orders equal
//! magnitudes by catalog position.

use crate::analysis::differential::per_gene_differential;
use crate::data::ExpressionStore;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::debug;

/// One ranked gene.
#[derive(Debug, Clone, PartialEq)]
pub struct TopGene {
    /// |mean(CASE) − mean(NORMAL)|
    pub abs_difference: f64,
    pub gene: String,
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry<'a> {
    abs_difference: f64,
    index: usize,
    gene: &'a str,
}

// Larger magnitude ranks higher; on equal magnitude the earlier catalog
// position ranks higher.
impl Ord for HeapEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.abs_difference
            .total_cmp(&other.abs_difference)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for HeapEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry<'_> {}

/// The `n` genes with the largest absolute differential, sorted descending.
///
/// Genes with an empty status group contribute nothing, as do NaN
/// differentials. `n == 0` returns an empty list; `n` at or above the catalog
/// size returns every numeric gene.
pub fn top_n_differential(store: &ExpressionStore, n: usize) -> Vec<TopGene> {
    if n == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<HeapEntry>> = BinaryHeap::with_capacity(n + 1);
    let mut skipped = 0usize;

    for item in per_gene_differential(store) {
        let Some(diff) = item.differential.value().filter(|d| !d.is_nan()) else {
            skipped += 1;
            continue;
        };
        let entry = HeapEntry {
            abs_difference: diff.abs(),
            index: item.index,
            gene: item.gene,
        };

        if heap.len() < n {
            heap.push(Reverse(entry));
        } else if let Some(Reverse(min)) = heap.peek() {
            if entry.abs_difference > min.abs_difference {
                heap.pop();
                heap.push(Reverse(entry));
            }
        }
    }

    debug!(n, kept = heap.len(), skipped, "top differential genes selected");

    let mut ranked: Vec<HeapEntry> = heap.into_iter().map(|Reverse(entry)| entry).collect();
    ranked.sort_by(|a, b| b.cmp(a));
    ranked
        .into_iter()
        .map(|entry| TopGene {
            abs_difference: entry.abs_difference,
            gene: entry.gene.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Status;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, array};

    /// One normal and one case sample; each gene's differential is
    /// `case - normal` of its column.
    fn store_with_differentials(diffs: &[f64]) -> ExpressionStore {
        let genes: Vec<String> = (0..diffs.len()).map(|i| format!("G{}", i + 1)).collect();
        let mut values = Array2::<f64>::zeros((2, diffs.len()));
        for (col, &d) in diffs.iter().enumerate() {
            values[[1, col]] = d;
        }
        ExpressionStore::new(
            genes,
            vec!["N1".into(), "C1".into()],
            vec![Status::Normal, Status::Case],
            values,
        )
        .unwrap()
    }

    fn names(top: &[TopGene]) -> Vec<&str> {
        top.iter().map(|t| t.gene.as_str()).collect()
    }

    #[test]
    fn test_selects_largest_magnitudes() {
        let store = store_with_differentials(&[0.5, -4.0, 2.0, 3.0, -1.0]);
        let top = top_n_differential(&store, 3);

        assert_eq!(names(&top), vec!["G2", "G4", "G3"]);
        assert_abs_diff_eq!(top[0].abs_difference, 4.0);
        assert_abs_diff_eq!(top[1].abs_difference, 3.0);
        assert_abs_diff_eq!(top[2].abs_difference, 2.0);
    }

    #[test]
    fn test_zero_returns_empty() {
        let store = store_with_differentials(&[1.0, 2.0]);
        assert!(top_n_differential(&store, 0).is_empty());
    }

    #[test]
    fn test_n_larger_than_catalog() {
        let store = store_with_differentials(&[1.0, -3.0, 2.0]);
        let top = top_n_differential(&store, 10);
        assert_eq!(names(&top), vec!["G2", "G3", "G1"]);
    }

    #[test]
    fn test_ties_keep_earliest_gene() {
        let store = store_with_differentials(&[2.0, 2.0, 2.0]);
        assert_eq!(names(&top_n_differential(&store, 1)), vec!["G1"]);
        assert_eq!(names(&top_n_differential(&store, 2)), vec!["G1", "G2"]);
    }

    #[test]
    fn test_tie_at_boundary_evicts_latest() {
        // After G1..G3 the heap (n = 2) holds G1(1.0), G2(1.0); G3(1.0) is
        // discarded. G4(5.0) must evict G2, leaving G1 as the survivor.
        let store = store_with_differentials(&[1.0, 1.0, 1.0, 5.0]);
        assert_eq!(names(&top_n_differential(&store, 2)), vec!["G4", "G1"]);
    }

    #[test]
    fn test_insufficient_groups_are_excluded() {
        let store = ExpressionStore::new(
            vec!["G1".to_string(), "G2".to_string()],
            vec!["S1".into(), "S2".into()],
            vec![Status::Case, Status::Case],
            array![[1.0, 2.0], [3.0, 4.0]],
        )
        .unwrap();
        assert!(top_n_differential(&store, 5).is_empty());
    }

    #[test]
    fn test_nan_differentials_are_excluded() {
        let store = store_with_differentials(&[f64::NAN, 1.0]);
        assert_eq!(names(&top_n_differential(&store, 2)), vec!["G2"]);
    }
}
