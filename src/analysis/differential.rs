//! Two-group differential expression.
//!
//! The differential of a gene is the CASE-group mean minus the NORMAL-group
//! mean. Genes lacking samples in either group get
//! [`Differential::InsufficientGroup`] instead of a number; this is a per-gene
//! outcome and never fails the batch.

use crate::analysis::utils::accumulate_group_sums;
use crate::analysis::validation::validate_genes;
use crate::data::ExpressionStore;
use crate::error::Result;
use std::collections::BTreeMap;
use tracing::debug;

/// Differential outcome for one gene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Differential {
    /// Mean(CASE) − mean(NORMAL)
    Difference(f64),
    /// At least one group has no samples for this gene
    InsufficientGroup { normal_count: usize, case_count: usize },
}

impl Differential {
    /// The numeric difference, if both groups were populated.
    pub fn value(&self) -> Option<f64> {
        match self {
            Differential::Difference(d) => Some(*d),
            Differential::InsufficientGroup { .. } => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Differential::InsufficientGroup { .. })
    }
}

/// Differential of a single known gene.
pub fn gene_differential(store: &ExpressionStore, gene: &str) -> Differential {
    let sums = accumulate_group_sums(store.series_for(gene));
    match (sums.case_mean(), sums.normal_mean()) {
        (Some(case), Some(normal)) => Differential::Difference(case - normal),
        _ => Differential::InsufficientGroup {
            normal_count: sums.normal_count,
            case_count: sums.case_count,
        },
    }
}

/// Differential expression for a batch of genes.
///
/// All names are deduplicated and validated before any gene is computed.
pub fn calculate_differential<S>(
    store: &ExpressionStore,
    genes: &[S],
) -> Result<BTreeMap<String, Differential>>
where
    S: AsRef<str>,
{
    let genes = validate_genes(store, genes)?;
    debug!(genes = genes.len(), "calculating differential expression");

    let results: BTreeMap<String, Differential> = genes
        .into_iter()
        .map(|gene| (gene.to_string(), gene_differential(store, gene)))
        .collect();

    let insufficient = results.values().filter(|d| d.is_insufficient()).count();
    if insufficient > 0 {
        debug!(insufficient, "genes lacking samples in one group");
    }

    Ok(results)
}

/// Lazily computed differential of one catalog gene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneDifferential<'a> {
    /// Position of the gene in the catalog
    pub index: usize,
    pub gene: &'a str,
    pub differential: Differential,
}

/// Iterator over every catalog gene's differential, in catalog order.
///
/// Each gene is computed on demand from the store, so walking the whole
/// catalog holds one result at a time. Create a fresh iterator with
/// [`per_gene_differential`] to start over.
#[derive(Debug, Clone)]
pub struct GeneDifferentials<'a> {
    store: &'a ExpressionStore,
    next_index: usize,
}

impl<'a> Iterator for GeneDifferentials<'a> {
    type Item = GeneDifferential<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store;
        let gene = store.gene_catalog().get(self.next_index)?;
        let index = self.next_index;
        self.next_index += 1;
        Some(GeneDifferential {
            index,
            gene: gene.as_str(),
            differential: gene_differential(store, gene),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.store.n_genes().saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GeneDifferentials<'_> {}

pub fn per_gene_differential(store: &ExpressionStore) -> GeneDifferentials<'_> {
    GeneDifferentials {
        store,
        next_index: 0,
    }
}
