//! Run configuration and mapping artifacts.
//!
//! The match run is configured by a JSON file with `source`, `relation`,
//! and optional `output` sections. Alias tables and taxonomy trees are
//! standalone artifacts loaded from JSON or YAML by file extension.

use std::fs;
use std::path::Path;

use faultmap_model::{AliasTable, TaxonomyTree};
use serde::Deserialize;
use tracing::debug;

use crate::error::{IngestError, Result, open_error};

/// The `source` section: row filter and text columns for the query side.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Filter expression; empty means all rows pass.
    #[serde(default)]
    pub filter: String,
    /// Columns concatenated into the text to score.
    pub text: Vec<String>,
}

/// The `relation` section: candidate side plus ignore and alias settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationConfig {
    #[serde(default)]
    pub filter: String,
    pub text: Vec<String>,
    /// Relation rows containing any of these substrings are skipped.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Alias table applied to the source text before scoring.
    #[serde(default)]
    pub alias: Option<AliasTable>,
}

/// One declared output column: header, provenance tag, and field name.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputColumnConfig {
    pub header: String,
    pub from: String,
    pub field: String,
}

/// Full configuration of a match run.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchConfig {
    pub source: DatasetConfig,
    pub relation: RelationConfig,
    /// Output projection; when absent the default console projection is used.
    #[serde(default)]
    pub output: Vec<OutputColumnConfig>,
}

/// Load the JSON run configuration.
///
/// Missing required sections (`source`, `relation`, their `text` lists)
/// surface as a parse error naming the missing field.
pub fn load_match_config(path: &Path) -> Result<MatchConfig> {
    let raw = fs::read_to_string(path).map_err(|e| open_error(path, e))?;
    let config: MatchConfig =
        serde_json::from_str(&raw).map_err(|e| IngestError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    debug!(path = %path.display(), "loaded match configuration");
    Ok(config)
}

/// Load an alias table artifact, JSON or YAML by extension.
pub fn load_alias_table(path: &Path) -> Result<AliasTable> {
    load_artifact(path)
}

/// Load a taxonomy tree artifact, JSON or YAML by extension.
pub fn load_taxonomy_tree(path: &Path) -> Result<TaxonomyTree> {
    load_artifact(path)
}

fn load_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|e| open_error(path, e))?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    if is_yaml {
        serde_yaml::from_str(&raw).map_err(|e| IngestError::ArtifactParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    } else {
        serde_json::from_str(&raw).map_err(|e| IngestError::ArtifactParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
