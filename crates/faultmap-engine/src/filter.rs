//! Column-value filter predicates.
//!
//! Grammar: `key1=val1,val2+key2=val3`. `+` separates column clauses
//! (conjunction), `,` separates acceptable values within a clause
//! (disjunction). Keys and values are trimmed.

use std::collections::BTreeMap;

use faultmap_model::{EngineError, Result, Row};

/// A parsed filter: column name to the set of acceptable values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    clauses: BTreeMap<String, Vec<String>>,
}

impl FilterSpec {
    /// Parse a filter expression.
    ///
    /// A clause without `=` or with an empty column name is a configuration
    /// error. Repeated columns merge their value lists.
    pub fn parse(expr: &str) -> Result<Self> {
        let mut clauses: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for clause in expr.split('+') {
            let Some((key, values)) = clause.split_once('=') else {
                return Err(EngineError::Config(format!(
                    "filter clause [{clause}] is missing '='"
                )));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(EngineError::Config(format!(
                    "filter clause [{clause}] has an empty column name"
                )));
            }
            clauses
                .entry(key.to_string())
                .or_default()
                .extend(values.split(',').map(|v| v.trim().to_string()));
        }
        Ok(Self { clauses })
    }

    /// Parse an optional filter: empty or whitespace-only expressions are
    /// the universal matcher, represented as `None`.
    pub fn parse_opt(expr: &str) -> Result<Option<Self>> {
        if expr.trim().is_empty() {
            return Ok(None);
        }
        Self::parse(expr).map(Some)
    }

    /// True iff every clause column is present in the row and the row's
    /// value equals one of the clause's values.
    ///
    /// A clause column absent from the row's schema is a schema error, not a
    /// non-match: it signals a misconfigured filter and must abort the run.
    pub fn matches(&self, row: &Row) -> Result<bool> {
        for (column, values) in &self.clauses {
            let value = row.require(column)?;
            if !values.iter().any(|v| v == value) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Clauses for display, column-sorted.
    pub fn clauses(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.clauses
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
