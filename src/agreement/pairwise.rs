//! Pairwise overlap between tool taxon sets.

use super::sets::ToolTaxonSets;
use serde::{Deserialize, Serialize};

/// Overlap between the taxa identified by two tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseOverlap {
    /// First tool (earlier in tool order).
    pub tool_a: String,
    /// Second tool.
    pub tool_b: String,
    /// Taxa identified by both tools.
    pub shared: usize,
    /// Taxa identified by either tool.
    pub union: usize,
    /// Jaccard index (shared / union), 0 when neither tool identified anything.
    pub jaccard: f64,
}

impl std::fmt::Display for PairwiseOverlap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vs {}: {} shared of {} ({:.1}% Jaccard)",
            self.tool_a,
            self.tool_b,
            self.shared,
            self.union,
            self.jaccard * 100.0
        )
    }
}

/// Compute overlap for every unordered pair of tools, in tool order.
pub fn pairwise_overlap(sets: &ToolTaxonSets) -> Vec<PairwiseOverlap> {
    let entries: Vec<_> = sets.iter().collect();
    let mut overlaps = Vec::with_capacity(entries.len() * entries.len().saturating_sub(1) / 2);

    for (i, (tool_a, taxa_a)) in entries.iter().enumerate() {
        for (tool_b, taxa_b) in entries.iter().skip(i + 1) {
            let shared = taxa_a.intersection(taxa_b).count();
            let union = taxa_a.len() + taxa_b.len() - shared;
            let jaccard = if union == 0 {
                0.0
            } else {
                shared as f64 / union as f64
            };
            overlaps.push(PairwiseOverlap {
                tool_a: tool_a.to_string(),
                tool_b: tool_b.to_string(),
                shared,
                union,
                jaccard,
            });
        }
    }

    overlaps
}
