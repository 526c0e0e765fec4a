use crate::config::LoaderConfig;
use crate::data::{SampleRecord, Status};
use crate::error::{ExpressionError, Result};
use csv::{ReaderBuilder, Trim};
use ndarray::Array2;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// Dense expression matrix with per-sample metadata.
///
/// Rows are samples in file order, columns are genes in header order.
#[derive(Debug, Clone)]
pub struct ExpressionStore {
    /// Expression values (samples × genes)
    values: Array2<f64>,
    sample_ids: Vec<String>,
    statuses: Vec<Status>,
    gene_names: Vec<String>,
    gene_index: HashMap<String, usize>,
}

impl ExpressionStore {
    /// Build a store from its parts.
    ///
    /// `values` must have one row per sample and one column per gene, and gene
    /// names must be unique.
    pub fn new(
        gene_names: Vec<String>,
        sample_ids: Vec<String>,
        statuses: Vec<Status>,
        values: Array2<f64>,
    ) -> Result<Self> {
        let (n_rows, n_cols) = values.dim();
        if n_rows != sample_ids.len() || n_rows != statuses.len() {
            return Err(ExpressionError::Parse {
                line: 0,
                message: format!(
                    "matrix has {} rows but {} sample ids and {} statuses were given",
                    n_rows,
                    sample_ids.len(),
                    statuses.len()
                ),
            });
        }
        if n_cols != gene_names.len() {
            return Err(ExpressionError::Parse {
                line: 0,
                message: format!(
                    "matrix has {} columns but {} gene names were given",
                    n_cols,
                    gene_names.len()
                ),
            });
        }

        let mut gene_index = HashMap::with_capacity(gene_names.len());
        for (col, name) in gene_names.iter().enumerate() {
            if gene_index.insert(name.clone(), col).is_some() {
                return Err(ExpressionError::DuplicateGene(name.clone()));
            }
        }

        Ok(ExpressionStore {
            values,
            sample_ids,
            statuses,
            gene_names,
            gene_index,
        })
    }

    /// Load a delimited expression file.
    pub fn from_path<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let store = Self::from_reader(BufReader::new(file), config)?;
        info!(
            path = %path.as_ref().display(),
            genes = store.n_genes(),
            samples = store.n_samples(),
            "expression data loaded"
        );
        Ok(store)
    }

    /// Parse delimited text.
    ///
    /// Expected format:
    /// - First row: two leading header cells (sample, status) followed by gene names
    /// - Subsequent rows: sample id, status label, then one value per gene
    ///
    /// Cells may be quoted; surrounding whitespace is trimmed.
    pub fn from_reader<R: Read>(reader: R, config: &LoaderConfig) -> Result<Self> {
        if !config.delimiter.is_ascii() {
            return Err(ExpressionError::Parse {
                line: 0,
                message: format!("delimiter '{}' is not a single-byte character", config.delimiter),
            });
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(config.delimiter as u8)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let header = reader.headers()?;
        if header.len() < 3 {
            return Err(ExpressionError::EmptyData(
                "header must name at least one gene after the sample and status columns"
                    .to_string(),
            ));
        }
        let gene_names: Vec<String> = header.iter().skip(2).map(|s| s.to_string()).collect();
        let n_genes = gene_names.len();

        let mut sample_ids = Vec::new();
        let mut statuses = Vec::new();
        let mut data: Vec<f64> = Vec::new();

        for result in reader.records() {
            let record = result?;
            let line_no = record.position().map_or(0, |p| p.line() as usize);

            if record.len() != n_genes + 2 {
                return Err(ExpressionError::Parse {
                    line: line_no,
                    message: format!("expected {} cells, found {}", n_genes + 2, record.len()),
                });
            }

            let label = &record[1];
            let status = parse_status(label, config).ok_or_else(|| {
                ExpressionError::UnknownStatus {
                    line: line_no,
                    label: label.to_string(),
                }
            })?;

            for (col, cell) in record.iter().skip(2).enumerate() {
                let value: f64 = cell.parse().map_err(|_| ExpressionError::Parse {
                    line: line_no,
                    message: format!("invalid value '{}' for gene {}", cell, gene_names[col]),
                })?;
                data.push(value);
            }

            sample_ids.push(record[0].to_string());
            statuses.push(status);
        }

        let values = Array2::from_shape_vec((sample_ids.len(), n_genes), data).map_err(|e| {
            ExpressionError::Parse {
                line: 0,
                message: e.to_string(),
            }
        })?;

        Self::new(gene_names, sample_ids, statuses, values)
    }

    /// Gene names in column order.
    pub fn gene_catalog(&self) -> &[String] {
        &self.gene_names
    }

    pub fn contains(&self, gene: &str) -> bool {
        self.gene_index.contains_key(gene)
    }

    pub fn n_genes(&self) -> usize {
        self.gene_names.len()
    }

    pub fn n_samples(&self) -> usize {
        self.sample_ids.len()
    }

    /// Sample records of one gene in file row order.
    ///
    /// Unknown genes yield an empty series; callers that need to tell the two
    /// apart must check [`contains`](Self::contains) first.
    pub fn series_for(&self, gene: &str) -> Series<'_> {
        Series {
            store: self,
            column: self.gene_index.get(gene).copied(),
            row: 0,
        }
    }

    /// Expression values of one gene, without sample ids or statuses.
    pub fn expression_values(&self, gene: &str) -> Result<Vec<f64>> {
        match self.gene_index.get(gene) {
            Some(&col) => Ok(self.values.column(col).to_vec()),
            None => Err(ExpressionError::UnknownGene(gene.to_string())),
        }
    }
}

fn parse_status(label: &str, config: &LoaderConfig) -> Option<Status> {
    if label == config.normal_label {
        Some(Status::Normal)
    } else if label == config.case_label {
        Some(Status::Case)
    } else {
        None
    }
}

/// Iterator over the [`SampleRecord`]s of one gene.
#[derive(Debug, Clone)]
pub struct Series<'a> {
    store: &'a ExpressionStore,
    column: Option<usize>,
    row: usize,
}

impl<'a> Iterator for Series<'a> {
    type Item = SampleRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let col = self.column?;
        let store = self.store;
        if self.row >= store.n_samples() {
            return None;
        }
        let row = self.row;
        self.row += 1;
        Some(SampleRecord {
            sample_id: &store.sample_ids[row],
            status: store.statuses[row],
            value: store.values[[row, col]],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.column {
            Some(_) => self.store.n_samples().saturating_sub(self.row),
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Series<'_> {}
