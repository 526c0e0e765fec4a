use crate::data::ExpressionStore;
use crate::error::{ExpressionError, Result};
use std::collections::HashSet;

/// Check a single gene name against the catalog.
pub fn validate_gene(store: &ExpressionStore, gene: &str) -> Result<()> {
    if store.contains(gene) {
        Ok(())
    } else {
        Err(ExpressionError::UnknownGene(gene.to_string()))
    }
}

/// Deduplicate a batch of requested genes and validate every one of them.
///
/// Names keep their first-seen order. The whole batch fails with the first
/// unknown name, before any caller has computed anything for it.
pub fn validate_genes<'g, S>(store: &ExpressionStore, genes: &'g [S]) -> Result<Vec<&'g str>>
where
    S: AsRef<str>,
{
    let mut seen = HashSet::with_capacity(genes.len());
    let unique: Vec<&str> = genes
        .iter()
        .map(AsRef::as_ref)
        .filter(|gene| seen.insert(*gene))
        .collect();

    for gene in &unique {
        validate_gene(store, gene)?;
    }

    Ok(unique)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Status;
    use ndarray::array;

    fn store() -> ExpressionStore {
        ExpressionStore::new(
            vec!["G1".to_string(), "G2".to_string()],
            vec!["S1".to_string()],
            vec![Status::Normal],
            array![[1.0, 2.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_duplicates_collapse_in_order() {
        let store = store();
        let genes = validate_genes(&store, &["G2", "G1", "G2"]).unwrap();
        assert_eq!(genes, vec!["G2", "G1"]);
    }

    #[test]
    fn test_unknown_gene_fails_batch() {
        let store = store();
        let err = validate_genes(&store, &["G1", "GX", "G2"]).unwrap_err();
        assert!(matches!(err, ExpressionError::UnknownGene(name) if name == "GX"));
    }

    #[test]
    fn test_empty_batch() {
        let store = store();
        let genes: Vec<String> = Vec::new();
        assert!(validate_genes(&store, &genes).unwrap().is_empty());
    }
}
