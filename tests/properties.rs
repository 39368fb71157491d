//! Property tests for ranking, matrix and agreement invariants.

use proptest::prelude::*;
use std::collections::HashMap;
use taxcompare::prelude::*;

const TOOLS: [&str; 4] = ["kraken2", "centrifuge", "kaiju", "metaphlan"];
const TAXA: [&str; 8] = [
    "Escherichia coli",
    "Bacteroides fragilis",
    "Klebsiella pneumoniae",
    "Staphylococcus aureus",
    "Prevotella copri",
    "Akkermansia muciniphila",
    "Faecalibacterium prausnitzii",
    "Bifidobacterium longum",
];

/// Rows drawn from a small vocabulary so that duplicates, zeros and ties occur.
fn arb_rows() -> impl Strategy<Value = Vec<ProfileRow>> {
    prop::collection::vec((0..TOOLS.len(), 0..TAXA.len(), 0u32..50), 1..60).prop_map(|rows| {
        rows.into_iter()
            .map(|(tool, taxon, count)| ProfileRow::new(TOOLS[tool], TAXA[taxon], count as f64))
            .collect()
    })
}

fn direct_totals(table: &ProfileTable) -> HashMap<String, f64> {
    let mut totals = HashMap::new();
    for row in table.rows() {
        *totals.entry(row.taxon.clone()).or_insert(0.0) += row.abundance;
    }
    totals
}

proptest! {
    #[test]
    fn ranking_preserves_abundance(rows in arb_rows(), top_n in 1usize..12) {
        let table = ProfileTable::new(rows).unwrap();
        let ranking = rank(&table, top_n).unwrap();
        let totals = direct_totals(&table);

        for entry in ranking.iter() {
            prop_assert_eq!(entry.total_abundance, totals[&entry.taxon]);
        }
        let expected: f64 = ranking.iter().map(|e| totals[&e.taxon]).sum();
        prop_assert_eq!(ranking.total(), expected);
    }

    #[test]
    fn ranking_length_is_bounded(rows in arb_rows(), top_n in 1usize..12) {
        let table = ProfileTable::new(rows).unwrap();
        let ranking = rank(&table, top_n).unwrap();
        prop_assert_eq!(ranking.len(), top_n.min(table.taxa().len()));
    }

    #[test]
    fn ranking_is_sorted_and_stable(rows in arb_rows()) {
        let table = ProfileTable::new(rows).unwrap();
        let ranking = rank(&table, TAXA.len()).unwrap();
        let entries = ranking.entries();

        for pair in entries.windows(2) {
            prop_assert!(pair[0].total_abundance >= pair[1].total_abundance);
            if pair[0].total_abundance == pair[1].total_abundance {
                let first = table.taxa().get_index_of(&pair[0].taxon).unwrap();
                let second = table.taxa().get_index_of(&pair[1].taxon).unwrap();
                prop_assert!(first < second);
            }
        }
    }

    #[test]
    fn ranking_survives_noop_filter(rows in arb_rows(), top_n in 1usize..12) {
        let table = ProfileTable::new(rows).unwrap();
        let filtered = table.filter(|_| true);
        prop_assert_eq!(rank(&table, top_n).unwrap(), rank(&filtered, top_n).unwrap());
    }

    #[test]
    fn matrix_cells_default_to_zero(rows in arb_rows()) {
        let table = ProfileTable::new(rows).unwrap();
        let taxa: Vec<&str> = TAXA.to_vec();
        let matrix = build(&table, &taxa).unwrap();
        let pivot = table.abundance_by_taxon_tool();

        for taxon in TAXA {
            for tool in table.tools() {
                let expected = pivot
                    .get(taxon)
                    .and_then(|row| row.get(tool))
                    .copied()
                    .unwrap_or(0.0);
                prop_assert_eq!(matrix.get(taxon, tool), Some(expected));
            }
        }
    }

    #[test]
    fn unique_sets_are_disjoint(rows in arb_rows()) {
        let table = ProfileTable::new(rows).unwrap();
        let result = analyze(&table).unwrap();

        let uniques: Vec<_> = result.unique_per_tool.iter().collect();
        for (i, (_, a)) in uniques.iter().enumerate() {
            prop_assert!(a.is_disjoint(&result.common) || result.tool_count() == 1);
            for (_, b) in uniques.iter().skip(i + 1) {
                prop_assert!(a.is_disjoint(b));
            }
        }
    }

    #[test]
    fn common_taxa_are_identified_by_every_tool(rows in arb_rows()) {
        let table = ProfileTable::new(rows).unwrap();
        let result = analyze(&table).unwrap();

        for taxon in &result.common {
            for (_, taxa) in result.tool_sets.iter() {
                prop_assert!(taxa.contains(taxon));
            }
        }
    }

    #[test]
    fn disjoint_tools_share_nothing(counts in prop::collection::vec(1u32..100, 2..8)) {
        // Tool i reports only taxa whose index is congruent to i modulo 2.
        let rows: Vec<ProfileRow> = counts
            .iter()
            .enumerate()
            .map(|(i, &c)| ProfileRow::new(TOOLS[i % 2], TAXA[i], c as f64))
            .collect();
        let table = ProfileTable::new(rows).unwrap();
        let result = analyze(&table).unwrap();

        prop_assert!(result.common.is_empty());
        for (tool, taxa) in result.tool_sets.iter() {
            prop_assert_eq!(&result.unique_per_tool[tool], taxa);
        }
    }
}
