//! Per-gene descriptive statistics.
//!
//! Mean, sample standard deviation (N − 1 denominator) and median of each
//! requested gene's expression values, pooled across both status groups.

use crate::analysis::validation::validate_genes;
use crate::data::ExpressionStore;
use crate::error::{ExpressionError, Result};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Median (mean of the two middle values for even counts)
    pub median: f64,
}

/// Compute descriptive statistics for a batch of genes.
///
/// Requested names are deduplicated and validated up front; an unknown name
/// fails the whole batch with [`ExpressionError::UnknownGene`]. A gene with
/// fewer than two observations fails with
/// [`ExpressionError::InsufficientSamples`].
pub fn calculate_statistics<S>(
    store: &ExpressionStore,
    genes: &[S],
) -> Result<BTreeMap<String, GeneStatistics>>
where
    S: AsRef<str>,
{
    let genes = validate_genes(store, genes)?;
    debug!(genes = genes.len(), "calculating descriptive statistics");

    let mut results = BTreeMap::new();
    for gene in genes {
        let values = store.expression_values(gene)?;
        results.insert(gene.to_string(), describe_values(gene, values)?);
    }

    Ok(results)
}

fn describe_values(gene: &str, mut values: Vec<f64>) -> Result<GeneStatistics> {
    if values.len() < 2 {
        return Err(ExpressionError::InsufficientSamples {
            gene: gene.to_string(),
            count: values.len(),
        });
    }

    let mean = values.iter().mean();
    let std_dev = values.iter().std_dev();
    let median = median(&mut values);

    Ok(GeneStatistics {
        mean,
        std_dev,
        median,
    })
}

/// Median of a non-empty slice. Reorders the input.
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}
