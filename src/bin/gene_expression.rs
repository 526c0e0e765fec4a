//! gene-expression - command-line front end
//!
//! Loads an expression file, runs the requested analyses and writes one text
//! report to the configured destinations.

use anyhow::{Context, Result};
use clap::Parser;
use gene_expression_stats::analysis::ExpressionAnalysis;
use gene_expression_stats::config::LoaderConfig;
use gene_expression_stats::data::ExpressionStore;
use gene_expression_stats::report::AnalysisReport;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Gene Expression Analysis Tool
#[derive(Parser, Debug)]
#[command(name = "gene-expression")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the gene expression data file
    #[arg(long)]
    data_file: PathBuf,

    /// JSON file overriding the delimiter and status labels
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gene whose raw expression values should be reported
    #[arg(long)]
    gene_name: Option<String>,

    /// Report every gene name in the dataset
    #[arg(long)]
    all_gene_names: bool,

    /// Genes to calculate statistics for
    #[arg(long, num_args = 1..)]
    statistics: Vec<String>,

    /// Genes to calculate differential expression for
    #[arg(long, num_args = 1..)]
    differential: Vec<String>,

    /// Number of top differentially expressed genes to find
    #[arg(long)]
    top_n: Option<usize>,

    /// Report samples expressed above this value
    #[arg(long)]
    threshold: Option<f64>,

    /// Restrict the threshold search to these genes (default: all genes)
    #[arg(long, num_args = 0..)]
    genes_above_threshold: Vec<String>,

    /// Output destinations: 'screen' or a file name
    #[arg(long, num_args = 1.., default_value = "screen")]
    output: Vec<String>,

    /// Add output destinations
    #[arg(long, num_args = 1..)]
    add: Vec<String>,

    /// Remove output destinations
    #[arg(long, num_args = 1..)]
    remove: Vec<String>,

    /// Check whether a destination is configured
    #[arg(long)]
    check: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LoaderConfig::from_json_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => LoaderConfig::default(),
    };
    let store = ExpressionStore::from_path(&cli.data_file, &config)
        .with_context(|| format!("failed to load {}", cli.data_file.display()))?;

    let mut report = AnalysisReport::new(&cli.output);
    if !cli.add.is_empty() {
        report.add_destinations(&cli.add);
        for dest in &cli.add {
            println!("Destination {dest} added.");
        }
    }
    if !cli.remove.is_empty() {
        report.remove_destinations(&cli.remove);
        for dest in &cli.remove {
            println!("Destination {dest} removed.");
        }
    }
    if let Some(dest) = &cli.check {
        if report.contains(dest) {
            println!("Destination {dest} is in the output destinations.");
        } else {
            println!("Destination {dest} is NOT in the output destinations.");
        }
    }
    println!("{report}");

    if cli.all_gene_names {
        report.append_gene_names(store.gene_catalog());
    }

    if let Some(gene) = &cli.gene_name {
        match store.expression_values(gene) {
            Ok(values) => report.append_gene_expression(gene, values),
            Err(e) => eprintln!("There was an error: {e}"),
        }
    }

    if !cli.statistics.is_empty() {
        match store.calculate_statistics(&cli.statistics) {
            Ok(stats) => report.append_statistics(stats),
            Err(e) => eprintln!("There was an error: {e}"),
        }
    }

    if !cli.differential.is_empty() {
        match store.calculate_differential(&cli.differential) {
            Ok(diffs) => report.append_differential(diffs),
            Err(e) => eprintln!("There was an error: {e}"),
        }
    }

    if let Some(n) = cli.top_n {
        report.append_top_n(n, store.top_n_differential(n));
    }

    if let Some(threshold) = cli.threshold {
        match store.expression_above_threshold(threshold, &cli.genes_above_threshold) {
            Ok(results) => report.append_threshold(threshold, results),
            Err(e) => eprintln!("There was an error: {e}"),
        }
    }

    report.output().context("failed to write report")?;
    Ok(())
}
