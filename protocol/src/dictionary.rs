//! Subset of the public dictionary API used for post-game fun facts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryEntry {
    pub word: String,
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Definition {
    pub definition: String,
}

/// First definition of the first meaning that has one, from the first entry.
pub fn first_definition(entries: &[DictionaryEntry]) -> Option<&str> {
    entries
        .first()?
        .meanings
        .iter()
        .find_map(|meaning| meaning.definitions.first())
        .map(|definition| definition.definition.as_str())
        .filter(|text| !text.trim().is_empty())
}

/// Text shown when no definition could be fetched.
pub fn hint_fallback(hint: &str) -> String {
    format!("Did you know? {hint}")
}
