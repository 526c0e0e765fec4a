//! Text report of analysis results.
//!
//! An [`AnalysisReport`] collects result sections in the order they are
//! appended and writes one banner-framed text block to each destination:
//! standard output (`screen`) or a `.txt` file opened in append mode.

use crate::analysis::{Differential, GeneStatistics, ThresholdOutcome, TopGene};
use crate::error::Result;
use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

const BANNER_WIDTH: usize = 50;
const SCREEN: &str = "screen";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Screen,
    File(PathBuf),
}

impl Destination {
    /// `screen` means standard output; anything else is a file name, which
    /// gets a `.txt` suffix if it lacks one.
    pub fn parse(name: &str) -> Self {
        if name == SCREEN {
            Destination::Screen
        } else if name.ends_with(".txt") {
            Destination::File(PathBuf::from(name))
        } else {
            Destination::File(PathBuf::from(format!("{name}.txt")))
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Screen => write!(f, "{SCREEN}"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
enum Section {
    GeneNames(Vec<String>),
    GeneExpression { gene: String, values: Vec<f64> },
    Statistics(BTreeMap<String, GeneStatistics>),
    Differential(BTreeMap<String, Differential>),
    TopN { n: usize, genes: Vec<TopGene> },
    Threshold {
        threshold: f64,
        results: BTreeMap<String, ThresholdOutcome>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    destinations: Vec<Destination>,
    sections: Vec<Section>,
}

impl AnalysisReport {
    pub fn new<S: AsRef<str>>(destinations: &[S]) -> Self {
        let mut report = AnalysisReport::default();
        report.add_destinations(destinations);
        report
    }

    /// Add destinations, skipping ones already present.
    pub fn add_destinations<S: AsRef<str>>(&mut self, destinations: &[S]) {
        for name in destinations {
            let destination = Destination::parse(name.as_ref());
            if !self.destinations.contains(&destination) {
                self.destinations.push(destination);
            }
        }
    }

    pub fn remove_destinations<S: AsRef<str>>(&mut self, destinations: &[S]) {
        for name in destinations {
            let destination = Destination::parse(name.as_ref());
            self.destinations.retain(|d| *d != destination);
        }
    }

    pub fn contains(&self, destination: &str) -> bool {
        self.destinations.contains(&Destination::parse(destination))
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn append_gene_names(&mut self, genes: &[String]) {
        self.sections.push(Section::GeneNames(genes.to_vec()));
    }

    pub fn append_gene_expression(&mut self, gene: &str, values: Vec<f64>) {
        self.sections.push(Section::GeneExpression {
            gene: gene.to_string(),
            values,
        });
    }

    pub fn append_statistics(&mut self, stats: BTreeMap<String, GeneStatistics>) {
        self.sections.push(Section::Statistics(stats));
    }

    pub fn append_differential(&mut self, diffs: BTreeMap<String, Differential>) {
        self.sections.push(Section::Differential(diffs));
    }

    pub fn append_top_n(&mut self, n: usize, genes: Vec<TopGene>) {
        self.sections.push(Section::TopN { n, genes });
    }

    pub fn append_threshold(
        &mut self,
        threshold: f64,
        results: BTreeMap<String, ThresholdOutcome>,
    ) {
        self.sections.push(Section::Threshold { threshold, results });
    }

    /// Render with the current local time.
    pub fn render(&self) -> String {
        self.render_at(Local::now().naive_local())
    }

    pub fn render_at(&self, generated: NaiveDateTime) -> String {
        RenderedReport {
            report: self,
            generated,
        }
        .to_string()
    }

    /// Write the rendered report to every destination.
    pub fn output(&self) -> Result<()> {
        let content = self.render();
        for destination in &self.destinations {
            match destination {
                Destination::Screen => {
                    let mut stdout = std::io::stdout().lock();
                    writeln!(stdout, "{content}")?;
                }
                Destination::File(path) => {
                    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                    writeln!(file, "{content}")?;
                    debug!(path = %path.display(), "report appended");
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.destinations.iter().map(|d| d.to_string()).collect();
        write!(f, "AnalysisReport configured to output to: {}", names.join(", "))
    }
}

/// A report frozen at one generation time.
struct RenderedReport<'a> {
    report: &'a AnalysisReport,
    generated: NaiveDateTime,
}

impl fmt::Display for RenderedReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(BANNER_WIDTH);
        writeln!(f, "{rule}\nANALYSIS REPORT\n{rule}")?;
        writeln!(
            f,
            "Report generated on: {}\n",
            self.generated.format("%Y-%m-%d %H:%M:%S")
        )?;
        for section in &self.report.sections {
            render_section(f, section)?;
            writeln!(f)?;
        }
        writeln!(f, "{rule}\nEND OF REPORT\n{rule}")
    }
}

fn render_section<W: fmt::Write>(out: &mut W, section: &Section) -> fmt::Result {
    match section {
        Section::GeneNames(genes) => {
            writeln!(out, "Gene names ({}):", genes.len())?;
            writeln!(out, "  {}", genes.join(", "))?;
        }
        Section::GeneExpression { gene, values } => {
            let formatted: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            writeln!(out, "Expression values of {gene}:")?;
            writeln!(out, "  {}", formatted.join(", "))?;
        }
        Section::Statistics(stats) => {
            writeln!(out, "Statistics:")?;
            for (gene, s) in stats {
                writeln!(
                    out,
                    "  {gene}: mean={:.3}, stdev={:.3}, median={:.3}",
                    s.mean, s.std_dev, s.median
                )?;
            }
        }
        Section::Differential(diffs) => {
            writeln!(out, "Differential expression (CASE - NORMAL):")?;
            for (gene, d) in diffs {
                match d {
                    Differential::Difference(value) => {
                        writeln!(out, "  {gene}: {value:.3}")?;
                    }
                    Differential::InsufficientGroup {
                        normal_count,
                        case_count,
                    } => {
                        writeln!(
                            out,
                            "  {gene}: either group is empty (normal={normal_count}, case={case_count})"
                        )?;
                    }
                }
            }
        }
        Section::TopN { n, genes } => {
            writeln!(out, "Top {n} differentially expressed genes:")?;
            for (rank, top) in genes.iter().enumerate() {
                writeln!(out, "  {}. {} ({:.3})", rank + 1, top.gene, top.abs_difference)?;
            }
        }
        Section::Threshold { threshold, results } => {
            writeln!(out, "Expression above {threshold}:")?;
            for (gene, outcome) in results {
                match outcome {
                    ThresholdOutcome::Empty => {
                        writeln!(out, "  {gene}: no expressions above the threshold")?;
                    }
                    ThresholdOutcome::Filtered(filtered) => {
                        writeln!(
                            out,
                            "  {gene}: {} sample(s), {}% case",
                            filtered.matches.len(),
                            filtered.case_percentage
                        )?;
                        for m in &filtered.matches {
                            writeln!(out, "    {} {} {}", m.sample_id, m.status, m.value)?;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
