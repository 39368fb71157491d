//! Analysis configuration, loadable from YAML.

use crate::data::ColumnNames;
use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a full comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Name of the analysis.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Number of top taxa to rank and compare.
    pub top_n: usize,
    /// Maximum number of example taxa listed per tool in the text report.
    pub max_examples: usize,
    /// Prefix for output files.
    pub output_prefix: String,
    /// Input column names.
    pub columns: ColumnNames,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            name: "classifier-comparison".to_string(),
            description: None,
            top_n: 10,
            max_examples: 5,
            output_prefix: "analysis".to_string(),
            columns: ColumnNames::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(CompareError::from)
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(CompareError::InvalidParameter(
                "top_n must be a positive integer".to_string(),
            ));
        }
        if self.output_prefix.trim().is_empty() {
            return Err(CompareError::InvalidParameter(
                "output_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Example configuration for a Kraken2 / Centrifuge / Kaiju comparison.
    pub fn example() -> Self {
        Self {
            name: "taxprofiler-comparison".to_string(),
            description: Some("Compare Kraken2, Centrifuge and Kaiju profiles".to_string()),
            ..Self::default()
        }
    }
}
