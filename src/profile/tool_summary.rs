//! Per-tool summary statistics: identified taxa and classified reads.

use crate::agreement::tool_taxon_sets;
use crate::data::ProfileTable;
use serde::{Deserialize, Serialize};

/// Summary of one tool's contribution to the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSummary {
    /// Tool name.
    pub tool: String,
    /// Number of rows the tool contributed (including zero-abundance rows).
    pub n_rows: usize,
    /// Distinct taxa identified (abundance > 0).
    pub n_taxa: usize,
    /// Total classified reads.
    pub total_abundance: f64,
    /// Fraction of all reads in the table attributed to this tool.
    pub read_fraction: f64,
}

impl std::fmt::Display for ToolSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<15}: {:>6} taxa, {:>12.0} reads classified",
            self.tool.to_uppercase(),
            self.n_taxa,
            self.total_abundance
        )
    }
}

/// Summarize every tool of the table, in first-seen tool order.
pub fn profile_tools(table: &ProfileTable) -> Vec<ToolSummary> {
    let sets = tool_taxon_sets(table);
    let totals = table.tool_totals();
    let grand_total: f64 = totals.values().sum();

    totals
        .into_iter()
        .map(|(tool, total_abundance)| {
            let n_rows = table.rows_for_tool(&tool).count();
            let n_taxa = sets.get(&tool).map_or(0, |taxa| taxa.len());
            let read_fraction = if grand_total > 0.0 {
                total_abundance / grand_total
            } else {
                0.0
            };
            ToolSummary {
                tool,
                n_rows,
                n_taxa,
                total_abundance,
                read_fraction,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ProfileRow;
    use approx::assert_relative_eq;

    fn create_test_table() -> ProfileTable {
        ProfileTable::new(vec![
            ProfileRow::new("kraken2", "E. coli", 60.0),
            ProfileRow::new("kraken2", "B. fragilis", 20.0),
            ProfileRow::new("kraken2", "E. coli", 20.0),
            ProfileRow::new("kaiju", "E. coli", 100.0),
            ProfileRow::new("kaiju", "P. copri", 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_profile_tools() {
        let summaries = profile_tools(&create_test_table());
        assert_eq!(summaries.len(), 2);

        let kraken = &summaries[0];
        assert_eq!(kraken.tool, "kraken2");
        assert_eq!(kraken.n_rows, 3);
        assert_eq!(kraken.n_taxa, 2);
        assert_relative_eq!(kraken.total_abundance, 100.0);
        assert_relative_eq!(kraken.read_fraction, 0.5);

        let kaiju = &summaries[1];
        assert_eq!(kaiju.n_rows, 2);
        assert_eq!(kaiju.n_taxa, 1);
    }

    #[test]
    fn test_display() {
        let summaries = profile_tools(&create_test_table());
        let line = summaries[0].to_string();
        assert!(line.starts_with("KRAKEN2"));
        assert!(line.contains("2 taxa"));
        assert!(line.ends_with("100 reads classified"));
    }

    #[test]
    fn test_all_zero_table() {
        let table = ProfileTable::new(vec![ProfileRow::new("kaiju", "X", 0.0)]).unwrap();
        let summaries = profile_tools(&table);
        assert_eq!(summaries[0].n_taxa, 0);
        assert_eq!(summaries[0].read_fraction, 0.0);
    }
}
