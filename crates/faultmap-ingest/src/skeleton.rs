//! Alias skeleton building.
//!
//! Reads the first levels of a causality tree CSV (`model`, `C1Name`,
//! `C2Name` columns) and produces the nested YAML skeleton that alias
//! authors fill in with real synonyms.

use std::collections::BTreeMap;
use std::path::Path;

use faultmap_model::Table;
use serde_yaml::{Mapping, Value};

use crate::error::{IngestError, Result};

const MODEL_COLUMN: &str = "model";
const C1_COLUMN: &str = "C1Name";
const C2_COLUMN: &str = "C2Name";

/// Placeholder synonyms emitted for every cause entry.
const PLACEHOLDER_SYNONYMS: [&str; 2] = ["alias1", "alias2"];

/// Optional restrictions on which causality rows contribute entries.
#[derive(Debug, Clone, Default)]
pub struct SkeletonFilter {
    pub model: Option<String>,
    pub c1name: Option<String>,
}

/// One level-2 category and its causes, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonCategory {
    pub name: String,
    pub causes: Vec<String>,
}

/// One model and its categories, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonModel {
    pub name: String,
    pub categories: Vec<SkeletonCategory>,
}

/// The alias skeleton: models in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasSkeleton {
    pub models: Vec<SkeletonModel>,
}

impl AliasSkeleton {
    /// Render as the nested YAML value:
    /// `model -> [ { category -> [ { cause -> [placeholders] } ] } ]`.
    pub fn to_yaml(&self) -> Value {
        let mut root = Mapping::new();
        for model in &self.models {
            let categories: Vec<Value> = model
                .categories
                .iter()
                .map(|category| {
                    let causes: Vec<Value> = category
                        .causes
                        .iter()
                        .map(|cause| {
                            let placeholders: Vec<Value> = PLACEHOLDER_SYNONYMS
                                .iter()
                                .map(|p| Value::String((*p).to_string()))
                                .collect();
                            let mut entry = Mapping::new();
                            entry.insert(
                                Value::String(cause.clone()),
                                Value::Sequence(placeholders),
                            );
                            Value::Mapping(entry)
                        })
                        .collect();
                    let mut entry = Mapping::new();
                    entry.insert(
                        Value::String(category.name.clone()),
                        Value::Sequence(causes),
                    );
                    Value::Mapping(entry)
                })
                .collect();
            root.insert(
                Value::String(model.name.clone()),
                Value::Sequence(categories),
            );
        }
        Value::Mapping(root)
    }
}

/// Build an alias skeleton from a causality table.
///
/// Rows are folded with a single pass and key-to-position indexes at every
/// level (find-or-append); duplicate causes within a category collapse.
/// Selecting no rows at all is an error, not an empty artifact.
pub fn build_alias_skeleton(
    table: &Table,
    path: &Path,
    filter: &SkeletonFilter,
) -> Result<AliasSkeleton> {
    for column in [MODEL_COLUMN, C1_COLUMN, C2_COLUMN] {
        if !table.has_column(column) {
            return Err(IngestError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            });
        }
    }

    let mut skeleton = AliasSkeleton::default();
    let mut model_index: BTreeMap<String, usize> = BTreeMap::new();
    let mut category_index: BTreeMap<(usize, String), usize> = BTreeMap::new();

    for row in &table.rows {
        let model = row.get(MODEL_COLUMN).unwrap_or("");
        let c1name = row.get(C1_COLUMN).unwrap_or("");
        let c2name = row.get(C2_COLUMN).unwrap_or("");

        if filter.model.as_deref().is_some_and(|m| m != model) {
            continue;
        }
        if filter.c1name.as_deref().is_some_and(|c| c != c1name) {
            continue;
        }

        let model_pos = *model_index.entry(model.to_string()).or_insert_with(|| {
            skeleton.models.push(SkeletonModel {
                name: model.to_string(),
                categories: Vec::new(),
            });
            skeleton.models.len() - 1
        });

        let categories = &mut skeleton.models[model_pos].categories;
        let category_pos = *category_index
            .entry((model_pos, c1name.to_string()))
            .or_insert_with(|| {
                categories.push(SkeletonCategory {
                    name: c1name.to_string(),
                    causes: Vec::new(),
                });
                categories.len() - 1
            });

        let causes = &mut categories[category_pos].causes;
        if !causes.iter().any(|c| c == c2name) {
            causes.push(c2name.to_string());
        }
    }

    if skeleton.models.is_empty() {
        return Err(IngestError::NothingSelected {
            model: filter.model.clone(),
            c1name: filter.c1name.clone(),
        });
    }

    Ok(skeleton)
}
