//! Score tables: CSV files keyed by compound label.
//!
//! The first column holds the label, every other column is a named numeric
//! dimension. The header either comes from the first line or is supplied as
//! a fixed list of field names.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::OntologyError;
use crate::math::round3;
use crate::types::Scores;

/// Where the column names of a table come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// The first non-empty line holds the column names
    FirstLine,
    /// Column names are supplied; every line is data
    Fields(Vec<String>),
}

impl Header {
    /// Explicit field names when given, otherwise the first line.
    pub fn from_fields(fields: Option<&[String]>) -> Self {
        match fields {
            Some(names) => Self::Fields(names.to_vec()),
            None => Self::FirstLine,
        }
    }
}

/// A table file on disk together with its header convention.
#[derive(Debug, Clone)]
pub struct TableSource {
    pub path: PathBuf,
    pub header: Header,
}

impl TableSource {
    pub fn new(path: impl Into<PathBuf>, header: Header) -> Self {
        Self {
            path: path.into(),
            header,
        }
    }
}

/// An immutable label → dimension-values table.
///
/// Every row carries one value per dimension, checked once at parse time,
/// so lookups never deal with missing fields.
#[derive(Debug, Clone)]
pub struct ScoreTable {
    dimensions: Vec<String>,
    rows: HashMap<String, Vec<f64>>,
}

impl ScoreTable {
    /// Read and parse a table from disk.
    pub fn load(source: &TableSource) -> Result<Self, OntologyError> {
        let content =
            std::fs::read_to_string(&source.path).map_err(|e| OntologyError::Read {
                path: source.path.clone(),
                message: e.to_string(),
            })?;
        let table = Self::parse(
            &content,
            source.header.clone(),
            &source.path.display().to_string(),
        )?;

        tracing::debug!(
            "Loaded score table {:?}: {} labels x {} dimensions",
            source.path,
            table.len(),
            table.dimensions.len(),
        );

        Ok(table)
    }

    /// Parse table content. `source_name` is only used in error messages.
    ///
    /// A label appearing on more than one row keeps the values of the last row.
    pub fn parse(content: &str, header: Header, source_name: &str) -> Result<Self, OntologyError> {
        let format_err = |message: String| OntologyError::Format {
            source_name: source_name.to_string(),
            message,
        };

        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_start_matches('\u{feff}').trim()))
            .filter(|(_, line)| !line.is_empty());

        let columns: Vec<String> = match header {
            Header::Fields(names) => names,
            Header::FirstLine => match lines.next() {
                Some((_, line)) => split_fields(line).map(str::to_string).collect(),
                None => {
                    return Err(format_err(
                        "no header line and no field names supplied".to_string(),
                    ))
                }
            },
        };

        if columns.len() < 2 {
            return Err(format_err(format!(
                "header needs a label column and at least one score column, got {:?}",
                columns
            )));
        }
        let dimensions: Vec<String> = columns[1..].to_vec();

        let mut rows = HashMap::new();
        for (line_no, line) in lines {
            let fields: Vec<&str> = split_fields(line).collect();
            if fields.len() != columns.len() {
                return Err(format_err(format!(
                    "line {line_no}: expected {} columns, found {}",
                    columns.len(),
                    fields.len()
                )));
            }

            let values = fields[1..]
                .iter()
                .zip(&dimensions)
                .map(|(raw, dim)| {
                    raw.parse::<f64>().map_err(|_| {
                        format_err(format!("line {line_no}: {dim} value {raw:?} is not a number"))
                    })
                })
                .collect::<Result<Vec<f64>, _>>()?;

            rows.insert(fields[0].to_string(), values);
        }

        Ok(Self { dimensions, rows })
    }

    /// Dimension names in column order.
    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    /// All labels in the table.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Whether the table has a row for `label`.
    pub fn contains(&self, label: &str) -> bool {
        self.rows.contains_key(label)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The raw record of a single label.
    pub fn record(&self, label: &str) -> Option<Scores> {
        self.rows
            .get(label)
            .map(|values| self.dimensions.iter().cloned().zip(values.iter().copied()).collect())
    }

    /// Per-dimension mean over `labels`, rounded to three decimals.
    ///
    /// Labels without a row are skipped. Returns `None` when no label has a row.
    pub fn average<I>(&self, labels: I) -> Option<Scores>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut sums = vec![0.0; self.dimensions.len()];
        let mut count = 0usize;

        for label in labels {
            let label = label.as_ref();
            match self.rows.get(label) {
                Some(values) => {
                    for (sum, value) in sums.iter_mut().zip(values) {
                        *sum += value;
                    }
                    count += 1;
                }
                None => tracing::debug!("No score row for label {label:?}, skipping"),
            }
        }

        if count == 0 {
            return None;
        }

        Some(
            self.dimensions
                .iter()
                .cloned()
                .zip(sums.into_iter().map(|sum| round3(sum / count as f64)))
                .collect(),
        )
    }
}

/// Split a CSV line on commas, trimming whitespace and surrounding quotes.
fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(|field| field.trim().trim_matches('"').trim())
}
