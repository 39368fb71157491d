//! Data structures for classifier comparison.

mod profile_table;

pub use profile_table::{is_identified, ColumnNames, ProfileRow, ProfileTable, RawRow};
