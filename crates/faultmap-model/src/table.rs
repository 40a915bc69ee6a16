//! Tabular records loaded from CSV sources.

use std::collections::BTreeMap;

use crate::error::{EngineError, Result};

/// One row of a tabular dataset: column name to string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    pub cells: BTreeMap<String, String>,
}

impl Row {
    /// Build a row from (column, value) pairs. Convenient in tests and loaders.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of a column, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Value of a column, or a schema error naming the column.
    pub fn require(&self, column: &str) -> Result<&str> {
        self.get(column)
            .ok_or_else(|| EngineError::Schema(column.to_string()))
    }

    /// Join the named columns with a single space, then trim.
    ///
    /// Empty cell values are not elided, so interior runs of spaces can
    /// appear; only the surrounding whitespace is trimmed.
    pub fn join_columns(&self, columns: &[String]) -> Result<String> {
        let mut parts = Vec::with_capacity(columns.len());
        for column in columns {
            parts.push(self.require(column)?);
        }
        Ok(parts.join(" ").trim().to_string())
    }
}

/// A loaded dataset: ordered header plus rows. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_missing_column() {
        let row = Row::from_pairs([("Area", "Line1")]);
        assert_eq!(row.require("Area").unwrap(), "Line1");
        assert_eq!(
            row.require("Shift"),
            Err(EngineError::Schema("Shift".to_string()))
        );
    }

    #[test]
    fn join_columns_uses_single_space_and_trims() {
        let row = Row::from_pairs([("A", "Pump"), ("B", ""), ("C", "failed")]);
        let joined = row
            .join_columns(&["A".to_string(), "B".to_string(), "C".to_string()])
            .unwrap();
        assert_eq!(joined, "Pump  failed");
    }

    #[test]
    fn join_columns_propagates_schema_error() {
        let row = Row::from_pairs([("A", "x")]);
        let err = row.join_columns(&["A".to_string(), "Z".to_string()]);
        assert_eq!(err, Err(EngineError::Schema("Z".to_string())));
    }
}
