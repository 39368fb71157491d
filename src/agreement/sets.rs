//! Per-tool sets of identified taxa.

use crate::data::{is_identified, ProfileTable};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// The taxa each tool identified.
///
/// Every tool of the table has an entry, in first-seen order, even if none of
/// its rows pass [`is_identified`]. Taxa within a set keep the order of the
/// tool's rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolTaxonSets {
    sets: IndexMap<String, IndexSet<String>>,
}

impl ToolTaxonSets {
    /// Taxa identified by one tool.
    pub fn get(&self, tool: &str) -> Option<&IndexSet<String>> {
        self.sets.get(tool)
    }

    /// Tool names in first-seen order.
    pub fn tools(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Number of tools.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if there are no tools.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterate over (tool, taxa) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexSet<String>)> {
        self.sets.iter()
    }

    /// All taxa identified by at least one tool.
    pub fn union(&self) -> IndexSet<String> {
        self.sets.values().flatten().cloned().collect()
    }

    /// Taxa identified by at least one tool other than `tool`.
    pub fn union_except(&self, tool: &str) -> IndexSet<&str> {
        self.sets
            .iter()
            .filter(|(name, _)| name.as_str() != tool)
            .flat_map(|(_, taxa)| taxa.iter().map(String::as_str))
            .collect()
    }

    /// Taxa identified by every tool.
    ///
    /// With a single tool this is that tool's full set; with no tools it is empty.
    pub fn intersection(&self) -> IndexSet<String> {
        let mut sets = self.sets.values();
        let Some(first) = sets.next() else {
            return IndexSet::new();
        };
        let rest: Vec<&IndexSet<String>> = sets.collect();
        first
            .iter()
            .filter(|taxon| rest.iter().all(|set| set.contains(*taxon)))
            .cloned()
            .collect()
    }
}

/// Collect the taxa each tool identified (abundance > 0).
pub fn tool_taxon_sets(table: &ProfileTable) -> ToolTaxonSets {
    let mut sets: IndexMap<String, IndexSet<String>> = table
        .tools()
        .iter()
        .map(|tool| (tool.clone(), IndexSet::new()))
        .collect();

    for row in table.rows() {
        if !is_identified(row.abundance) {
            continue;
        }
        if let Some(set) = sets.get_mut(&row.tool) {
            set.insert(row.taxon.clone());
        }
    }

    ToolTaxonSets { sets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ProfileRow;

    fn create_test_table() -> ProfileTable {
        ProfileTable::new(vec![
            ProfileRow::new("kraken2", "E. coli", 10.0),
            ProfileRow::new("kraken2", "S. aureus", 0.0),
            ProfileRow::new("kaiju", "E. coli", 3.0),
            ProfileRow::new("kaiju", "B. fragilis", 2.0),
            ProfileRow::new("centrifuge", "S. aureus", 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_zero_abundance_not_identified() {
        let sets = tool_taxon_sets(&create_test_table());
        assert!(!sets.get("kraken2").unwrap().contains("S. aureus"));
        assert_eq!(sets.get("kraken2").unwrap().len(), 1);
    }

    #[test]
    fn test_tool_with_only_zero_rows_has_empty_set() {
        let sets = tool_taxon_sets(&create_test_table());
        assert_eq!(sets.len(), 3);
        assert!(sets.get("centrifuge").unwrap().is_empty());
    }

    #[test]
    fn test_union_and_intersection() {
        let table = create_test_table().filter(|row| row.tool != "centrifuge");
        let sets = tool_taxon_sets(&table);

        let union_set = sets.union();
        let union: Vec<&str> = union_set.iter().map(String::as_str).collect();
        assert_eq!(union, vec!["E. coli", "B. fragilis"]);

        let common: Vec<String> = sets.intersection().into_iter().collect();
        assert_eq!(common, vec!["E. coli"]);
    }

    #[test]
    fn test_union_except() {
        let sets = tool_taxon_sets(&create_test_table());
        let others = sets.union_except("kaiju");
        assert!(others.contains("E. coli"));
        assert!(!others.contains("B. fragilis"));
    }
}
