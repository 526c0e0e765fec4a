//! # gene-expression-stats
//!
//! Descriptive and comparative statistics for sample-by-gene expression matrices where each
//! sample carries a disease status (NORMAL or CASE).
//!
//! The crate loads a delimited expression file into an in-memory [`data::ExpressionStore`] and
//! answers four kinds of questions about it through the [`analysis::ExpressionAnalysis`] trait:
//! per-gene descriptive statistics, two-group mean differences, the top-N genes by absolute
//! difference, and which samples express a gene above a threshold.
//!
//! ## Core Features
//!
//! - **Descriptive Statistics**: mean, sample standard deviation and median per gene
//! - **Differential Expression**: CASE mean minus NORMAL mean, with an explicit outcome for genes
//!   missing one of the groups
//! - **Top-N Selection**: bounded min-heap over a lazy per-gene stream
//! - **Threshold Filtering**: matching samples per gene with the CASE share among them
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io::Cursor;
//! use gene_expression_stats::analysis::ExpressionAnalysis;
//! use gene_expression_stats::config::LoaderConfig;
//! use gene_expression_stats::data::ExpressionStore;
//!
//! let text = "sample,status,G1,G2\nS1,normal,1.0,1.0\nS2,HCC,3.0,3.0\n";
//! let store = ExpressionStore::from_reader(Cursor::new(text), &LoaderConfig::default()).unwrap();
//!
//! let diffs = store.calculate_differential(&["G1", "G2"]).unwrap();
//! assert_eq!(diffs["G1"].value(), Some(2.0));
//!
//! let top = store.top_n_differential(1);
//! assert_eq!(top[0].gene, "G1");
//! ```
//!
//! ## Module Organization
//!
//! - **[`data`]**: The expression dataset and its loader
//! - **[`analysis`]**: Validation, statistics, differential expression, top-N and threshold filtering
//! - **[`report`]**: Text rendering of results to the screen or files
//! - **[`config`]**: Loader settings
//! - **[`error`]**: Error type shared by all modules

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod report;

pub use error::{ExpressionError, Result};
