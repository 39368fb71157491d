//! Harmonized long-format profile table (tool, taxon, abundance).

use crate::error::{CompareError, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Whether a reported abundance counts as an identification of the taxon.
///
/// Rows with zero abundance are kept in the table (they still contribute a
/// tool and a taxon name) but never count as the tool having found the taxon.
#[inline]
pub fn is_identified(abundance: f64) -> bool {
    abundance > 0.0
}

/// Column names used when reading a harmonized profile file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Column holding the classifier name.
    pub tool: String,
    /// Column holding the taxon display name.
    pub taxon: String,
    /// Column holding the read count.
    pub abundance: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            tool: "tool".to_string(),
            taxon: "taxonomy_name".to_string(),
            abundance: "count".to_string(),
        }
    }
}

/// An untyped input record, as handed over by a reader.
///
/// `None` means the field was absent from the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub tool: Option<String>,
    pub taxon: Option<String>,
    pub abundance: Option<String>,
}

impl RawRow {
    /// Convenience constructor with every field present.
    pub fn new(tool: &str, taxon: &str, abundance: &str) -> Self {
        Self {
            tool: Some(tool.to_string()),
            taxon: Some(taxon.to_string()),
            abundance: Some(abundance.to_string()),
        }
    }
}

/// A validated row of the profile table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    /// Classifier that produced the assignment.
    pub tool: String,
    /// Taxon display name, used as the taxon identity key.
    pub taxon: String,
    /// Reported abundance (read count), finite and non-negative.
    pub abundance: f64,
}

impl ProfileRow {
    pub fn new(tool: &str, taxon: &str, abundance: f64) -> Self {
        Self {
            tool: tool.to_string(),
            taxon: taxon.to_string(),
            abundance,
        }
    }
}

/// Immutable table of classifier assignments.
///
/// Rows keep their input order. Distinct tools and taxa are tracked in
/// first-seen order, which downstream ranking relies on for tie-breaking.
/// Duplicate `(tool, taxon)` rows are allowed and are summed by every
/// aggregation helper.
#[derive(Debug, Clone, Default)]
pub struct ProfileTable {
    rows: Vec<ProfileRow>,
    tools: IndexSet<String>,
    taxa: IndexSet<String>,
}

impl ProfileTable {
    /// Build a table from typed rows, validating each one.
    ///
    /// Tool and taxon names are trimmed the same way as in [`ProfileTable::from_rows`].
    pub fn new(rows: Vec<ProfileRow>) -> Result<Self> {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                let row = ProfileRow {
                    tool: row.tool.trim().to_string(),
                    taxon: row.taxon.trim().to_string(),
                    abundance: row.abundance,
                };
                validate_row(idx + 1, &row)?;
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_validated(rows))
    }

    /// Build a table from untyped records.
    ///
    /// Construction stops at the first bad record; no partial table is returned.
    /// Row numbers in errors are 1-based.
    pub fn from_rows<I>(raw_rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRow>,
    {
        Self::from_numbered_rows(
            raw_rows
                .into_iter()
                .enumerate()
                .map(|(idx, raw)| (idx + 1, raw)),
        )
    }

    fn from_numbered_rows<I>(raw_rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, RawRow)>,
    {
        let rows = raw_rows
            .into_iter()
            .map(|(row_num, raw)| parse_raw_row(row_num, raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_validated(rows))
    }

    /// Load a tab-separated profile file using the default column names
    /// (`tool`, `taxonomy_name`, `count`).
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_tsv_with_columns(path, &ColumnNames::default())
    }

    /// Load a tab-separated profile file with custom column names.
    pub fn from_tsv_with_columns<P: AsRef<Path>>(path: P, columns: &ColumnNames) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading profile table");
        let file = File::open(path)?;
        Self::from_reader(file, columns)
    }

    /// Read a tab-separated profile from any reader.
    ///
    /// Extra columns are ignored and blank lines are skipped. A header without
    /// data rows gives an empty table. Row numbers in errors are 1-based file
    /// lines, counting the header as line 1.
    pub fn from_reader<R: Read>(reader: R, columns: &ColumnNames) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| CompareError::MissingColumn(name.to_string()))
        };
        let tool_col = position(&columns.tool)?;
        let taxon_col = position(&columns.taxon)?;
        let abundance_col = position(&columns.abundance)?;

        let mut raw_rows = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            let line = record
                .position()
                .map_or(idx + 2, |pos| pos.line() as usize);
            raw_rows.push((
                line,
                RawRow {
                    tool: record.get(tool_col).map(str::to_string),
                    taxon: record.get(taxon_col).map(str::to_string),
                    abundance: record.get(abundance_col).map(str::to_string),
                },
            ));
        }

        let table = Self::from_numbered_rows(raw_rows)?;
        debug!(
            rows = table.len(),
            tools = table.tools.len(),
            taxa = table.taxa.len(),
            "profile table loaded"
        );
        Ok(table)
    }

    fn from_validated(rows: Vec<ProfileRow>) -> Self {
        let mut tools = IndexSet::new();
        let mut taxa = IndexSet::new();
        for row in &rows {
            if !tools.contains(&row.tool) {
                tools.insert(row.tool.clone());
            }
            if !taxa.contains(&row.taxon) {
                taxa.insert(row.taxon.clone());
            }
        }
        Self { rows, tools, taxa }
    }

    /// Distinct tool names in first-seen order.
    #[inline]
    pub fn tools(&self) -> &IndexSet<String> {
        &self.tools
    }

    /// Distinct taxon names in first-seen order.
    #[inline]
    pub fn taxa(&self) -> &IndexSet<String> {
        &self.taxa
    }

    /// The normalized rows, in input order.
    #[inline]
    pub fn rows(&self) -> &[ProfileRow] {
        &self.rows
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows reported by a single tool.
    pub fn rows_for_tool<'a>(&'a self, tool: &'a str) -> impl Iterator<Item = &'a ProfileRow> + 'a {
        self.rows.iter().filter(move |row| row.tool == tool)
    }

    /// Total abundance per taxon summed over all tools, in first-seen taxon order.
    pub fn taxon_totals(&self) -> IndexMap<String, f64> {
        let mut totals: IndexMap<String, f64> =
            self.taxa.iter().map(|taxon| (taxon.clone(), 0.0)).collect();
        for row in &self.rows {
            if let Some(total) = totals.get_mut(&row.taxon) {
                *total += row.abundance;
            }
        }
        totals
    }

    /// Total abundance per tool, in first-seen tool order.
    pub fn tool_totals(&self) -> IndexMap<String, f64> {
        let mut totals: IndexMap<String, f64> =
            self.tools.iter().map(|tool| (tool.clone(), 0.0)).collect();
        for row in &self.rows {
            if let Some(total) = totals.get_mut(&row.tool) {
                *total += row.abundance;
            }
        }
        totals
    }

    /// Summed abundance keyed by taxon, then tool.
    ///
    /// Only pairs that occur in the table are present.
    pub fn abundance_by_taxon_tool(&self) -> IndexMap<String, IndexMap<String, f64>> {
        let mut pivot: IndexMap<String, IndexMap<String, f64>> = IndexMap::new();
        for row in &self.rows {
            *pivot
                .entry(row.taxon.clone())
                .or_default()
                .entry(row.tool.clone())
                .or_insert(0.0) += row.abundance;
        }
        pivot
    }

    /// A new table with only the rows matching `predicate`.
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&ProfileRow) -> bool,
    {
        let rows = self.rows.iter().filter(|row| predicate(row)).cloned().collect();
        Self::from_validated(rows)
    }
}

fn validate_row(row_num: usize, row: &ProfileRow) -> Result<()> {
    if row.tool.trim().is_empty() {
        return Err(malformed(row_num, "empty tool name"));
    }
    if row.taxon.trim().is_empty() {
        return Err(malformed(row_num, "empty taxon name"));
    }
    check_abundance(row_num, row.abundance)
}

fn check_abundance(row_num: usize, abundance: f64) -> Result<()> {
    if !abundance.is_finite() {
        return Err(malformed(
            row_num,
            &format!("abundance {} is not a finite number", abundance),
        ));
    }
    if abundance < 0.0 {
        return Err(malformed(
            row_num,
            &format!("abundance {} is negative", abundance),
        ));
    }
    Ok(())
}

fn parse_raw_row(row_num: usize, raw: RawRow) -> Result<ProfileRow> {
    let tool = required_field(row_num, "tool", raw.tool)?;
    let taxon = required_field(row_num, "taxon", raw.taxon)?;
    let abundance_str = required_field(row_num, "abundance", raw.abundance)?;

    let abundance: f64 = abundance_str.parse().map_err(|_| {
        malformed(
            row_num,
            &format!("abundance '{}' is not numeric", abundance_str),
        )
    })?;
    check_abundance(row_num, abundance)?;

    Ok(ProfileRow {
        tool,
        taxon,
        abundance,
    })
}

fn required_field(row_num: usize, name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(malformed(row_num, &format!("missing field '{}'", name))),
    }
}

fn malformed(row: usize, reason: &str) -> CompareError {
    CompareError::MalformedInput {
        row,
        reason: reason.to_string(),
    }
}
