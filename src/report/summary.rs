//! Assembled comparison report and its text rendering.

use crate::agreement::{analyze, AgreementResult, PairwiseOverlap};
use crate::compare::{build, ComparisonMatrix};
use crate::config::AnalysisConfig;
use crate::data::ProfileTable;
use crate::error::Result;
use crate::profile::{profile_tools, ToolSummary};
use crate::rank::{rank, TaxonRanking};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

const RULE_WIDTH: usize = 80;

/// Everything a reviewer needs to judge how far the classifiers agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Analysis name.
    pub name: String,
    /// Number of input rows.
    pub n_rows: usize,
    /// Per-tool taxon and read counts.
    pub tool_summaries: Vec<ToolSummary>,
    /// Top taxa by abundance summed across tools.
    pub ranking: TaxonRanking,
    /// Abundance of the top taxa per tool.
    pub matrix: ComparisonMatrix,
    /// Shared and tool-specific taxa.
    pub agreement: AgreementResult,
    /// Overlap for each pair of tools.
    pub pairwise: Vec<PairwiseOverlap>,
    /// Example taxa listed per tool when a tool has at most this many unique taxa.
    #[serde(skip, default = "default_max_examples")]
    max_examples: usize,
}

fn default_max_examples() -> usize {
    AnalysisConfig::default().max_examples
}

impl AnalysisReport {
    /// Run every comparison over `table` and collect the results.
    pub fn assemble(table: &ProfileTable, config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;

        let agreement = analyze(table)?;
        let ranking = rank(table, config.top_n)?;
        let matrix = build(table, &ranking.taxa())?;
        let pairwise = agreement.pairwise();
        let tool_summaries = profile_tools(table);

        info!(
            name = %config.name,
            rows = table.len(),
            tools = tool_summaries.len(),
            top_taxa = ranking.len(),
            "assembled comparison report"
        );

        Ok(Self {
            name: config.name.clone(),
            n_rows: table.len(),
            tool_summaries,
            ranking,
            matrix,
            agreement,
            pairwise,
            max_examples: config.max_examples,
        })
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write `<prefix>_summary.txt` and `<prefix>_matrix.tsv`.
    ///
    /// Returns the paths written.
    pub fn write_outputs(&self, prefix: &str) -> Result<Vec<PathBuf>> {
        let summary_path = PathBuf::from(format!("{}_summary.txt", prefix));
        let matrix_path = PathBuf::from(format!("{}_matrix.tsv", prefix));

        let mut writer = BufWriter::new(File::create(&summary_path)?);
        write!(writer, "{}", self)?;
        writer.flush()?;

        self.matrix.to_tsv(&matrix_path)?;

        info!(
            summary = %summary_path.display(),
            matrix = %matrix_path.display(),
            "wrote report files"
        );
        Ok(vec![summary_path, matrix_path])
    }
}

impl std::fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(f, "{}", heavy)?;
        writeln!(f, "CLASSIFIER COMPARISON SUMMARY: {}", self.name)?;
        let tools: Vec<&str> = self.agreement.tool_sets.tools().collect();
        writeln!(f, "Tools: {}", tools.join(", "))?;
        writeln!(f, "{}", heavy)?;
        writeln!(f)?;

        writeln!(f, "OVERALL STATISTICS")?;
        writeln!(f, "{}", light)?;
        writeln!(f, "Taxonomic assignments: {}", self.n_rows)?;
        for summary in &self.tool_summaries {
            writeln!(f, "{}", summary)?;
        }

        writeln!(f)?;
        writeln!(f, "TOP {} TAXA (by total abundance)", self.ranking.len())?;
        writeln!(f, "{}", light)?;
        write!(f, "{}", self.ranking)?;

        writeln!(f)?;
        writeln!(f, "ABUNDANCE COMPARISON ACROSS TOOLS")?;
        writeln!(f, "{}", light)?;
        write!(f, "{}", self.matrix)?;

        writeln!(f)?;
        writeln!(f, "AGREEMENT ANALYSIS")?;
        writeln!(f, "{}", light)?;
        writeln!(f, "Taxa identified by ALL tools: {}", self.agreement.n_common())?;
        writeln!(f)?;
        for (tool, unique) in &self.agreement.unique_per_tool {
            writeln!(f, "Taxa unique to {}: {}", tool.to_uppercase(), unique.len())?;
            if !unique.is_empty() && unique.len() <= self.max_examples {
                let examples: Vec<&str> = unique.iter().map(String::as_str).collect();
                writeln!(f, "  Examples: {}", examples.join(", "))?;
            }
        }

        if !self.pairwise.is_empty() {
            writeln!(f)?;
            writeln!(f, "PAIRWISE OVERLAP")?;
            writeln!(f, "{}", light)?;
            for overlap in &self.pairwise {
                writeln!(f, "{}", overlap)?;
            }
        }
        Ok(())
    }
}
