//! Tabular result container for platform responses
//!
//! The platform API returns result sets as lists of JSON records. `Table`
//! keeps them as columns plus string cells, which is all the adapters need
//! to render CSV blocks and narrative sections.

use crate::error::{DataError, Result};
use serde_json::Value;
use std::collections::BTreeSet;

/// Column-ordered tabular data with string cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from a list of JSON objects.
    ///
    /// Columns are the sorted union of all record keys; missing values
    /// render as empty cells.
    pub fn from_records(records: &[Value]) -> Self {
        let mut keys = BTreeSet::new();
        for record in records {
            if let Some(object) = record.as_object() {
                for key in object.keys() {
                    keys.insert(key.clone());
                }
            }
        }
        let columns: Vec<String> = keys.into_iter().collect();

        let rows = records
            .iter()
            .filter_map(Value::as_object)
            .map(|object| {
                columns
                    .iter()
                    .map(|column| object.get(column).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Append a row. The row must match the column count.
    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value by row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == column)?;
        let cell = self.rows.get(row)?.get(index)?;
        if cell.is_empty() { None } else { Some(cell) }
    }

    /// First non-empty cell among the named columns, for records where the
    /// same field appears under different provider-specific names.
    pub fn get_any(&self, row: usize, columns: &[&str]) -> Option<&str> {
        columns.iter().find_map(|column| self.get(row, column))
    }

    /// Rename columns in place; absent names are ignored
    pub fn rename_columns(&mut self, renames: &[(&str, &str)]) {
        for column in &mut self.columns {
            if let Some((_, to)) = renames.iter().find(|(from, _)| from == column) {
                *column = (*to).to_string();
            }
        }
    }

    /// Round the numeric cells of the named columns to `decimals` places.
    /// Non-numeric cells are left untouched.
    pub fn round_columns(&mut self, names: &[&str], decimals: usize) {
        let indexes: Vec<usize> = names
            .iter()
            .filter_map(|name| self.columns.iter().position(|c| c == name))
            .collect();
        for row in &mut self.rows {
            for &index in &indexes {
                if let Some(cell) = row.get_mut(index) {
                    if let Ok(value) = cell.parse::<f64>() {
                        *cell = format!("{value:.decimals$}");
                    }
                }
            }
        }
    }

    /// The last `n` rows as a new table
    pub fn tail(&self, n: usize) -> Table {
        let skip = self.rows.len().saturating_sub(n);
        Table {
            columns: self.columns.clone(),
            rows: self.rows[skip..].to_vec(),
        }
    }

    /// Render as CSV: a header row followed by data rows
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| DataError::Api(format!("CSV buffer error: {e}")))?;
        String::from_utf8(bytes).map_err(|e| DataError::Api(format!("CSV encoding error: {e}")))
    }
}

/// Render a JSON scalar as a CSV/text cell
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
