//! Output row projection.
//!
//! An output spec declares, per output column, where the value comes from:
//! a source-row column, a relation-row column, or a field of the match
//! metadata. Unknown provenance tags and unknown fuzz fields are rejected
//! when the spec is built, before any row is processed.

use faultmap_model::{EngineError, Result, Row};
use serde::{Deserialize, Serialize};

use crate::matcher::MatchResult;

/// Where an output column's value originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// A named column of the matched source row.
    Source,
    /// A named column of the matched relation row.
    Relation,
    /// A named field of the match metadata.
    Fuzz,
}

impl Provenance {
    /// Parse a provenance tag, reporting the offending output column on
    /// failure.
    pub fn parse(tag: &str, header: &str) -> Result<Self> {
        match tag {
            "source" => Ok(Self::Source),
            "relation" => Ok(Self::Relation),
            "fuzz" => Ok(Self::Fuzz),
            other => Err(EngineError::Config(format!(
                "output column [{header}] has unrecognized provenance tag [{other}]"
            ))),
        }
    }
}

/// Fields of the match metadata addressable from a `fuzz` column.
const FUZZ_FIELDS: [&str; 4] = ["score", "metric", "matched_text", "query_text"];

/// One declared output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputColumn {
    pub header: String,
    pub provenance: Provenance,
    pub field: String,
}

/// Ordered declaration of the output row layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSpec {
    columns: Vec<OutputColumn>,
}

impl OutputSpec {
    /// Validate and build a spec from declared columns.
    ///
    /// Fails fast on a `fuzz` column naming an unknown metadata field.
    pub fn new(columns: Vec<OutputColumn>) -> Result<Self> {
        for column in &columns {
            if column.provenance == Provenance::Fuzz
                && !FUZZ_FIELDS.contains(&column.field.as_str())
            {
                return Err(EngineError::Config(format!(
                    "output column [{}] references unknown fuzz field [{}]",
                    column.header, column.field
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Build a spec from `(header, tag, field)` declarations, e.g. as read
    /// from a configuration file.
    pub fn from_declarations<'a, I>(declarations: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let columns = declarations
            .into_iter()
            .map(|(header, tag, field)| {
                Ok(OutputColumn {
                    header: header.to_string(),
                    provenance: Provenance::parse(tag, header)?,
                    field: field.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns)
    }

    /// The projection used when no output section is configured: the scored
    /// query, the winning relation text, and the score metadata.
    pub fn default_console() -> Self {
        Self {
            columns: vec![
                OutputColumn {
                    header: "source_text".to_string(),
                    provenance: Provenance::Fuzz,
                    field: "query_text".to_string(),
                },
                OutputColumn {
                    header: "match_text".to_string(),
                    provenance: Provenance::Fuzz,
                    field: "matched_text".to_string(),
                },
                OutputColumn {
                    header: "score".to_string(),
                    provenance: Provenance::Fuzz,
                    field: "score".to_string(),
                },
                OutputColumn {
                    header: "method".to_string(),
                    provenance: Provenance::Fuzz,
                    field: "metric".to_string(),
                },
            ],
        }
    }

    pub fn columns(&self) -> &[OutputColumn] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The output header row, in declared order.
    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// Assemble one output row for a resolved match.
    ///
    /// `relation_row` is required only when a `relation` column is declared.
    pub fn project(
        &self,
        source_row: &Row,
        relation_row: Option<&Row>,
        result: &MatchResult,
    ) -> Result<Vec<String>> {
        let mut values = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let value = match column.provenance {
                Provenance::Source => source_row.require(&column.field)?.to_string(),
                Provenance::Relation => {
                    let row = relation_row.ok_or_else(|| {
                        EngineError::Config(format!(
                            "output column [{}] needs a relation row but none was matched",
                            column.header
                        ))
                    })?;
                    row.require(&column.field)?.to_string()
                }
                Provenance::Fuzz => match column.field.as_str() {
                    "score" => result.score.to_string(),
                    "metric" => result.metric.name().to_string(),
                    "matched_text" => result.matched_text.clone(),
                    "query_text" => result.query_text.clone(),
                    // Unknown fields are rejected in `new`.
                    other => {
                        return Err(EngineError::Config(format!(
                            "output column [{}] references unknown fuzz field [{other}]",
                            column.header
                        )));
                    }
                },
            };
            values.push(value);
        }
        Ok(values)
    }
}
