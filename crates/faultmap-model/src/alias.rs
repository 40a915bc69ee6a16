//! Alias substitution tables.
//!
//! An alias table maps a canonical token to the literal substrings that are
//! considered synonymous with it. Entries keep the insertion order of the
//! source artifact because replacement output depends on it: later entries
//! operate on text already rewritten by earlier ones.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One canonical token and its synonym substrings, in listed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub canonical: String,
    pub synonyms: Vec<String>,
}

/// Ordered mapping from canonical token to synonym substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
    index: BTreeMap<String, usize>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find-or-append the entry for a canonical token, returning its position.
    pub fn insert_canonical(&mut self, canonical: &str) -> usize {
        if let Some(&position) = self.index.get(canonical) {
            return position;
        }
        let position = self.entries.len();
        self.entries.push(AliasEntry {
            canonical: canonical.to_string(),
            synonyms: Vec::new(),
        });
        self.index.insert(canonical.to_string(), position);
        position
    }

    /// Add a synonym under a canonical token, creating the entry if needed.
    pub fn insert(&mut self, canonical: &str, synonym: impl Into<String>) {
        let position = self.insert_canonical(canonical);
        self.entries[position].synonyms.push(synonym.into());
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn synonyms_of(&self, canonical: &str) -> Option<&[String]> {
        self.index
            .get(canonical)
            .map(|&position| self.entries[position].synonyms.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite `text` by replacing every synonym occurrence with its
    /// canonical token.
    ///
    /// Canonical tokens are visited in insertion order, synonyms in listed
    /// order, each as a literal (non-regex) substring replacement applied to
    /// the possibly-already-rewritten text. A single pass per synonym; the
    /// replacement output is not re-scanned for the same token, but later
    /// tokens do see earlier replacements. Not idempotent when a canonical
    /// token is itself listed as a synonym elsewhere.
    pub fn apply(&self, text: &str) -> String {
        let mut rewritten = text.to_string();
        for entry in &self.entries {
            for synonym in &entry.synonyms {
                if synonym.is_empty() {
                    continue;
                }
                rewritten = rewritten.replace(synonym.as_str(), &entry.canonical);
            }
        }
        rewritten
    }
}

impl Serialize for AliasTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.canonical, &entry.synonyms)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AliasTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = AliasTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from canonical token to a list of synonyms")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = AliasTable::new();
                while let Some((canonical, synonyms)) =
                    access.next_entry::<String, Vec<String>>()?
                {
                    table.insert_canonical(&canonical);
                    for synonym in synonyms {
                        table.insert(&canonical, synonym);
                    }
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
