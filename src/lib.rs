//! Taxonomic Classifier Comparison Library
//!
//! This library compares the taxonomic profiles that several classifiers
//! (e.g. Kraken2, Centrifuge, Kaiju) produced for the same samples, once
//! those profiles have been harmonized into one long table of
//! `(tool, taxon, abundance)` rows.
//!
//! # Overview
//!
//! - **data**: The harmonized profile table and its TSV reader
//! - **rank**: Taxa ranked by abundance summed across tools
//! - **compare**: Taxon × tool abundance matrix for a set of taxa
//! - **agreement**: Taxa shared by all tools, unique to one tool, pairwise overlap
//! - **profile**: Per-tool taxon and read counts
//! - **report**: Assembled report with text, JSON and YAML output
//! - **config**: YAML analysis configuration
//!
//! # Example
//!
//! ```no_run
//! use taxcompare::prelude::*;
//!
//! let table = ProfileTable::from_tsv("taxpasta_standardised_profiles.tsv").unwrap();
//!
//! let top = rank(&table, 10).unwrap();
//! let matrix = build(&table, &top.taxa()).unwrap();
//! let agreement = analyze(&table).unwrap();
//!
//! println!("{}", matrix);
//! println!("Taxa identified by all tools: {}", agreement.n_common());
//! ```

pub mod agreement;
pub mod compare;
pub mod config;
pub mod data;
pub mod error;
pub mod profile;
pub mod rank;
pub mod report;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::agreement::{
        analyze, pairwise_overlap, tool_taxon_sets, AgreementResult, PairwiseOverlap,
        ToolTaxonSets,
    };
    pub use crate::compare::{build, ComparisonMatrix};
    pub use crate::config::AnalysisConfig;
    pub use crate::data::{is_identified, ColumnNames, ProfileRow, ProfileTable, RawRow};
    pub use crate::error::{CompareError, Result};
    pub use crate::profile::{profile_tools, ToolSummary};
    pub use crate::rank::{rank, RankedTaxon, TaxonRanking};
    pub use crate::report::AnalysisReport;
}
