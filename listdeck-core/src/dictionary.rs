//! Read-only status dictionaries.
//!
//! The dictionary is loaded once at startup and injected into each
//! controller; nothing in the core ever mutates it.

use serde::Deserialize;
use std::collections::HashMap;

/// Label and style tag for one status code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DictEntry {
    pub label: String,
    #[serde(rename = "cssTag")]
    pub css_tag: String,
}

/// Dictionary key (e.g. `common.status`) → status code → entry.
///
/// Codes are kept as strings in the serialized form (JSON object keys)
/// and looked up by their numeric value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dictionary {
    #[serde(flatten)]
    maps: HashMap<String, HashMap<String, DictEntry>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        dictionary_key: impl Into<String>,
        code: i64,
        entry: DictEntry,
    ) {
        self.maps
            .entry(dictionary_key.into())
            .or_default()
            .insert(code.to_string(), entry);
    }

    pub fn entry(&self, dictionary_key: &str, code: i64) -> Option<&DictEntry> {
        self.maps
            .get(dictionary_key)?
            .get(code.to_string().as_str())
    }

    pub fn contains_key(&self, dictionary_key: &str) -> bool {
        self.maps.contains_key(dictionary_key)
    }
}
