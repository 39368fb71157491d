//! Agreement between tools: shared and tool-specific taxa.

use super::pairwise::{pairwise_overlap, PairwiseOverlap};
use super::sets::{tool_taxon_sets, ToolTaxonSets};
use crate::data::ProfileTable;
use crate::error::{CompareError, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of comparing the taxon sets of all tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementResult {
    /// Taxa identified by every tool.
    pub common: IndexSet<String>,
    /// For each tool, the taxa no other tool identified.
    pub unique_per_tool: IndexMap<String, IndexSet<String>>,
    /// The per-tool sets the result was computed from.
    pub tool_sets: ToolTaxonSets,
}

impl AgreementResult {
    /// Number of tools compared.
    pub fn tool_count(&self) -> usize {
        self.tool_sets.len()
    }

    /// Number of taxa shared by all tools.
    pub fn n_common(&self) -> usize {
        self.common.len()
    }

    /// Number of taxa only `tool` identified.
    pub fn n_unique(&self, tool: &str) -> usize {
        self.unique_per_tool.get(tool).map_or(0, IndexSet::len)
    }

    /// Taxa only `tool` identified.
    pub fn unique(&self, tool: &str) -> Option<&IndexSet<String>> {
        self.unique_per_tool.get(tool)
    }

    /// All taxa identified by at least one tool.
    pub fn union(&self) -> IndexSet<String> {
        self.tool_sets.union()
    }

    /// Overlap statistics for every pair of tools.
    pub fn pairwise(&self) -> Vec<PairwiseOverlap> {
        pairwise_overlap(&self.tool_sets)
    }
}

impl std::fmt::Display for AgreementResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (tool, taxa) in self.tool_sets.iter() {
            writeln!(f, "{}: {} identified taxa", tool.to_uppercase(), taxa.len())?;
        }
        writeln!(f)?;
        writeln!(f, "Taxa identified by ALL tools: {}", self.n_common())?;
        for (tool, unique) in &self.unique_per_tool {
            writeln!(f, "Taxa unique to {}: {}", tool.to_uppercase(), unique.len())?;
        }
        Ok(())
    }
}

/// Compare the taxa identified by each tool of the table.
///
/// 1. Each tool's set holds the taxa it reported with abundance > 0.
/// 2. `common` is the intersection of all sets (a single tool's full set when
///    only one tool is present).
/// 3. A tool's unique taxa are its set minus the union of every other set.
///
/// # Errors
/// `NoTools` if the table has no tools.
pub fn analyze(table: &ProfileTable) -> Result<AgreementResult> {
    if table.tools().is_empty() {
        return Err(CompareError::NoTools);
    }

    let tool_sets = tool_taxon_sets(table);
    let common = tool_sets.intersection();

    let mut unique_per_tool = IndexMap::with_capacity(tool_sets.len());
    for (tool, taxa) in tool_sets.iter() {
        let others = tool_sets.union_except(tool);
        let unique: IndexSet<String> = taxa
            .iter()
            .filter(|taxon| !others.contains(taxon.as_str()))
            .cloned()
            .collect();
        debug!(tool = %tool, identified = taxa.len(), unique = unique.len(), "tool taxon set");
        unique_per_tool.insert(tool.clone(), unique);
    }

    info!(
        tools = tool_sets.len(),
        common = common.len(),
        "agreement analysis complete"
    );

    Ok(AgreementResult {
        common,
        unique_per_tool,
        tool_sets,
    })
}
