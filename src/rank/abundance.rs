//! Ranking taxa by abundance aggregated across tools.

use crate::data::ProfileTable;
use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A taxon with its abundance summed over every tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTaxon {
    /// Taxon display name.
    pub taxon: String,
    /// Abundance summed over all tools and duplicate rows.
    pub total_abundance: f64,
}

/// Taxa ordered by total abundance, highest first.
///
/// Equal totals keep the order in which the taxa first appear in the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonRanking {
    entries: Vec<RankedTaxon>,
}

impl TaxonRanking {
    /// Ranked entries, highest abundance first.
    pub fn entries(&self) -> &[RankedTaxon] {
        &self.entries
    }

    /// Taxon names in rank order.
    pub fn taxa(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.taxon.clone()).collect()
    }

    /// Number of ranked taxa.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the abundance of every ranked taxon.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.total_abundance).sum()
    }

    /// Iterate over entries in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &RankedTaxon> {
        self.entries.iter()
    }
}

impl std::fmt::Display for TaxonRanking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(
                f,
                "{:2}. {:<50} {:>12.0} reads",
                i + 1,
                entry.taxon,
                entry.total_abundance
            )?;
        }
        Ok(())
    }
}

/// Rank taxa by abundance summed across all tools and keep the top `top_n`.
///
/// # Arguments
/// * `table` - The profile table
/// * `top_n` - Number of taxa to keep (must be at least 1)
///
/// # Returns
/// At most `top_n` taxa, highest total first. Asking for more taxa than the
/// table holds returns all of them.
pub fn rank(table: &ProfileTable, top_n: usize) -> Result<TaxonRanking> {
    if top_n == 0 {
        return Err(CompareError::InvalidParameter(
            "top_n must be a positive integer".to_string(),
        ));
    }

    // taxon_totals iterates in first-seen order; a stable sort keeps that
    // order among equal totals.
    let mut entries: Vec<RankedTaxon> = table
        .taxon_totals()
        .into_iter()
        .map(|(taxon, total_abundance)| RankedTaxon {
            taxon,
            total_abundance,
        })
        .collect();
    entries.sort_by(|a, b| b.total_abundance.total_cmp(&a.total_abundance));
    entries.truncate(top_n);

    debug!(requested = top_n, ranked = entries.len(), "ranked taxa by abundance");
    Ok(TaxonRanking { entries })
}
