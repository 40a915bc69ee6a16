//! Two-level causality taxonomy.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A level-1 category and its ordered level-2 sub-categories (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyNode {
    pub name: String,
    pub children: Vec<String>,
}

/// Ordered mapping from level-1 category to level-2 sub-categories.
///
/// Loaded once from a JSON/YAML artifact and read-only for the lifetime of a
/// classification run. Node order follows the artifact's document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyTree {
    nodes: Vec<TaxonomyNode>,
    index: BTreeMap<String, usize>,
}

impl TaxonomyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find-or-append the node for a category, returning its position.
    pub fn insert_category(&mut self, name: &str) -> usize {
        if let Some(&position) = self.index.get(name) {
            return position;
        }
        let position = self.nodes.len();
        self.nodes.push(TaxonomyNode {
            name: name.to_string(),
            children: Vec::new(),
        });
        self.index.insert(name.to_string(), position);
        position
    }

    /// Append a sub-category, creating the category if needed.
    pub fn insert_child(&mut self, category: &str, child: impl Into<String>) {
        let position = self.insert_category(category);
        self.nodes[position].children.push(child.into());
    }

    pub fn nodes(&self) -> &[TaxonomyNode] {
        &self.nodes
    }

    pub fn children_of(&self, category: &str) -> Option<&[String]> {
        self.index
            .get(category)
            .map(|&position| self.nodes[position].children.as_slice())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Serialize for TaxonomyTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.nodes.len()))?;
        for node in &self.nodes {
            map.serialize_entry(&node.name, &node.children)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TaxonomyTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TreeVisitor;

        impl<'de> Visitor<'de> for TreeVisitor {
            type Value = TaxonomyTree;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from level-1 category to a list of level-2 names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut tree = TaxonomyTree::new();
                while let Some((category, children)) =
                    access.next_entry::<String, Vec<String>>()?
                {
                    tree.insert_category(&category);
                    for child in children {
                        tree.insert_child(&category, child);
                    }
                }
                Ok(tree)
            }
        }

        deserializer.deserialize_map(TreeVisitor)
    }
}
