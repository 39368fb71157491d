//! Agreement analysis over the taxon sets reported by each tool.
//!
//! - **sets**: which taxa each tool identified
//! - **analyze**: taxa common to all tools and taxa unique to one tool
//! - **pairwise**: shared taxa and Jaccard index for every pair of tools

pub mod analyze;
pub mod pairwise;
pub mod sets;

pub use analyze::{analyze, AgreementResult};
pub use pairwise::{pairwise_overlap, PairwiseOverlap};
pub use sets::{tool_taxon_sets, ToolTaxonSets};
