//! Tool × taxon comparison matrices.

pub mod matrix;

pub use matrix::{build, ComparisonMatrix};
