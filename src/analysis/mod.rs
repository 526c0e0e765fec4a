//! Statistical analysis of an [`ExpressionStore`].
//!
//! Every batch operation validates all requested gene names before computing
//! anything, so an unknown name never yields a partial result. Per-gene
//! degraded outcomes (an empty status group, no sample above a threshold) are
//! reported as enum variants inside the result map instead.

use crate::data::ExpressionStore;
use crate::error::Result;
use std::collections::BTreeMap;

pub mod descriptive;
pub mod differential;
pub mod threshold;
pub mod top_n;
pub mod validation;

pub mod utils;

pub use descriptive::GeneStatistics;
pub use differential::{Differential, GeneDifferential, GeneDifferentials};
pub use threshold::{ThresholdMatch, ThresholdMatches, ThresholdOutcome};
pub use top_n::TopGene;

pub trait ExpressionAnalysis {
    /// Mean, sample standard deviation and median per requested gene.
    fn calculate_statistics<S: AsRef<str>>(
        &self,
        genes: &[S],
    ) -> Result<BTreeMap<String, GeneStatistics>>;

    /// CASE mean minus NORMAL mean per requested gene.
    fn calculate_differential<S: AsRef<str>>(
        &self,
        genes: &[S],
    ) -> Result<BTreeMap<String, Differential>>;

    /// Lazy differentials of every catalog gene, in catalog order.
    fn per_gene_differential(&self) -> GeneDifferentials<'_>;

    /// The `n` genes with the largest absolute differential, descending.
    fn top_n_differential(&self, n: usize) -> Vec<TopGene>;

    /// Samples expressed strictly above `threshold`; an empty `genes` slice
    /// means every catalog gene.
    fn expression_above_threshold<S: AsRef<str>>(
        &self,
        threshold: f64,
        genes: &[S],
    ) -> Result<BTreeMap<String, ThresholdOutcome>>;
}

impl ExpressionAnalysis for ExpressionStore {
    fn calculate_statistics<S: AsRef<str>>(
        &self,
        genes: &[S],
    ) -> Result<BTreeMap<String, GeneStatistics>> {
        descriptive::calculate_statistics(self, genes)
    }

    fn calculate_differential<S: AsRef<str>>(
        &self,
        genes: &[S],
    ) -> Result<BTreeMap<String, Differential>> {
        differential::calculate_differential(self, genes)
    }

    fn per_gene_differential(&self) -> GeneDifferentials<'_> {
        differential::per_gene_differential(self)
    }

    fn top_n_differential(&self, n: usize) -> Vec<TopGene> {
        top_n::top_n_differential(self, n)
    }

    fn expression_above_threshold<S: AsRef<str>>(
        &self,
        threshold: f64,
        genes: &[S],
    ) -> Result<BTreeMap<String, ThresholdOutcome>> {
        threshold::expression_above_threshold(self, threshold, genes)
    }
}
