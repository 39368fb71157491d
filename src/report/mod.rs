//! Report assembly: collects the comparison results for text, JSON or YAML output.

mod summary;

pub use summary::AnalysisReport;
