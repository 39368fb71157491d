//! Pivot of a profile table into taxon × tool abundances.

use crate::data::ProfileTable;
use crate::error::{CompareError, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Abundance of a set of taxa as reported by every tool.
///
/// Every (taxon, tool) cell is populated. Tools that never reported a taxon
/// hold exactly `0.0` for it. Rows follow the order of the requested taxa
/// and columns follow the first-seen tool order of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMatrix {
    /// Tool names (columns).
    tools: Vec<String>,
    /// Taxon → tool → summed abundance.
    values: IndexMap<String, IndexMap<String, f64>>,
}

impl ComparisonMatrix {
    /// Abundance for a cell, or `None` if the taxon or tool is not part of the matrix.
    pub fn get(&self, taxon: &str, tool: &str) -> Option<f64> {
        self.values.get(taxon).and_then(|row| row.get(tool)).copied()
    }

    /// Per-tool abundances for one taxon.
    pub fn row(&self, taxon: &str) -> Option<&IndexMap<String, f64>> {
        self.values.get(taxon)
    }

    /// Taxon names (rows) in matrix order.
    pub fn taxa(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Tool names (columns).
    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    /// Number of taxa.
    pub fn n_taxa(&self) -> usize {
        self.values.len()
    }

    /// Number of tools.
    pub fn n_tools(&self) -> usize {
        self.tools.len()
    }

    /// The full taxon → tool → abundance mapping.
    pub fn values(&self) -> &IndexMap<String, IndexMap<String, f64>> {
        &self.values
    }

    /// Column sums: abundance per tool over the matrix taxa.
    pub fn tool_totals(&self) -> IndexMap<String, f64> {
        let mut totals: IndexMap<String, f64> =
            self.tools.iter().map(|t| (t.clone(), 0.0)).collect();
        for row in self.values.values() {
            for (tool, value) in row {
                if let Some(total) = totals.get_mut(tool) {
                    *total += value;
                }
            }
        }
        totals
    }

    /// Write the matrix as a tab-separated table (heatmap input).
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_tsv(file)
    }

    /// Write the matrix as a tab-separated table to any writer.
    pub fn write_tsv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);

        let mut header = vec!["taxonomy_name".to_string()];
        header.extend(self.tools.iter().cloned());
        wtr.write_record(&header)?;

        for taxon in self.taxa() {
            let mut record = Vec::with_capacity(self.tools.len() + 1);
            record.push(taxon.to_string());
            let row = self.row(taxon);
            for tool in &self.tools {
                let value = row.and_then(|cells| cells.get(tool)).copied().unwrap_or(0.0);
                record.push(format!("{}", value));
            }
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl std::fmt::Display for ComparisonMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name_width = self
            .values
            .keys()
            .map(|t| t.chars().count())
            .max()
            .unwrap_or(0)
            .max("taxonomy_name".len());

        write!(f, "{:<width$}", "taxonomy_name", width = name_width)?;
        for tool in &self.tools {
            write!(f, "  {:>12}", tool)?;
        }
        writeln!(f)?;

        for (taxon, row) in &self.values {
            write!(f, "{:<width$}", taxon, width = name_width)?;
            for tool in &self.tools {
                let value = row.get(tool).copied().unwrap_or(0.0);
                write!(f, "  {:>12.0}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Build a comparison matrix restricted to `taxa`.
///
/// Each requested taxon gets one row with a value for every tool of the
/// table. Duplicate rows in the table are summed; pairs with no row are
/// `0.0`. Repeated taxa in `taxa` are collapsed to their first occurrence.
///
/// # Errors
/// `EmptyTaxonSet` if `taxa` is empty.
pub fn build<S: AsRef<str>>(table: &ProfileTable, taxa: &[S]) -> Result<ComparisonMatrix> {
    if taxa.is_empty() {
        return Err(CompareError::EmptyTaxonSet);
    }

    let wanted: IndexSet<&str> = taxa.iter().map(AsRef::as_ref).collect();
    let tools: Vec<String> = table.tools().iter().cloned().collect();

    let mut values: IndexMap<String, IndexMap<String, f64>> = wanted
        .iter()
        .map(|&taxon| {
            let row = tools.iter().map(|tool| (tool.clone(), 0.0)).collect();
            (taxon.to_string(), row)
        })
        .collect();

    for row in table.rows() {
        if let Some(cells) = values.get_mut(&row.taxon) {
            if let Some(cell) = cells.get_mut(&row.tool) {
                *cell += row.abundance;
            }
        }
    }

    debug!(taxa = values.len(), tools = tools.len(), "built comparison matrix");
    Ok(ComparisonMatrix { tools, values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ProfileRow;
    use crate::rank::rank;

    fn create_test_table() -> ProfileTable {
        ProfileTable::new(vec![
            ProfileRow::new("kraken2", "Escherichia coli", 120.0),
            ProfileRow::new("kraken2", "Bacteroides fragilis", 40.0),
            ProfileRow::new("centrifuge", "Escherichia coli", 100.0),
            ProfileRow::new("kaiju", "Prevotella copri", 15.0),
            ProfileRow::new("kraken2", "Escherichia coli", 5.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_fills_missing_with_zero() {
        let table = create_test_table();
        let matrix = build(&table, &["Escherichia coli", "Prevotella copri"]).unwrap();

        assert_eq!(matrix.n_taxa(), 2);
        assert_eq!(matrix.n_tools(), 3);
        assert_eq!(matrix.get("Escherichia coli", "kraken2"), Some(125.0));
        assert_eq!(matrix.get("Escherichia coli", "centrifuge"), Some(100.0));
        assert_eq!(matrix.get("Escherichia coli", "kaiju"), Some(0.0));
        assert_eq!(matrix.get("Prevotella copri", "kraken2"), Some(0.0));
        assert_eq!(matrix.get("Prevotella copri", "kaiju"), Some(15.0));
    }

    #[test]
    fn test_build_excludes_unrequested_taxa() {
        let table = create_test_table();
        let matrix = build(&table, &["Escherichia coli"]).unwrap();
        assert_eq!(matrix.get("Bacteroides fragilis", "kraken2"), None);
        assert_eq!(matrix.taxa().collect::<Vec<_>>(), vec!["Escherichia coli"]);
    }

    #[test]
    fn test_build_empty_taxa_rejected() {
        let table = create_test_table();
        let taxa: Vec<String> = Vec::new();
        assert!(matches!(build(&table, &taxa), Err(CompareError::EmptyTaxonSet)));
    }

    #[test]
    fn test_build_from_ranking() {
        let table = create_test_table();
        let ranking = rank(&table, 2).unwrap();
        let matrix = build(&table, &ranking.taxa()).unwrap();
        assert_eq!(
            matrix.taxa().collect::<Vec<_>>(),
            vec!["Escherichia coli", "Bacteroides fragilis"]
        );
        let totals = matrix.tool_totals();
        assert_eq!(totals["kraken2"], 165.0);
        assert_eq!(totals["kaiju"], 0.0);
    }

    #[test]
    fn test_row_covers_every_tool() {
        let table = create_test_table();
        let matrix = build(&table, &["Prevotella copri"]).unwrap();

        let row = matrix.row("Prevotella copri").unwrap();
        let cells: Vec<(&str, f64)> = row.iter().map(|(t, &v)| (t.as_str(), v)).collect();
        assert_eq!(cells, vec![("kraken2", 0.0), ("centrifuge", 0.0), ("kaiju", 15.0)]);
        assert!(matrix.row("Escherichia coli").is_none());
    }

    #[test]
    fn test_duplicate_requested_taxa_collapsed() {
        let table = create_test_table();
        let matrix = build(&table, &["Prevotella copri", "Prevotella copri"]).unwrap();
        assert_eq!(matrix.n_taxa(), 1);
    }

    #[test]
    fn test_write_tsv() {
        let table = create_test_table();
        let matrix = build(&table, &["Escherichia coli", "Prevotella copri"]).unwrap();

        let mut buf = Vec::new();
        matrix.write_tsv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "taxonomy_name\tkraken2\tcentrifuge\tkaiju");
        assert_eq!(lines[1], "Escherichia coli\t125\t100\t0");
        assert_eq!(lines[2], "Prevotella copri\t0\t0\t15");
    }
}
