//! Abundance ranking of taxa across tools.

pub mod abundance;

pub use abundance::{rank, RankedTaxon, TaxonRanking};
