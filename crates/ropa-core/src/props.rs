//! OSCAL `props` as an insertion-ordered set keyed by name.
//!
//! ```text
//! template props (JSON list)
//!     ↕  from_entries / into_entries
//! PropertySet (raw entries + name index)
//! ```
//!
//! Entries stay raw JSON objects. An upsert writes only the `value` key of
//! the entry it targets; every other entry keeps its keys, key order and
//! value type.

use indexmap::IndexMap;
use serde_json::{Map, Value};

const NAME_KEY: &str = "name";
const VALUE_KEY: &str = "value";

/// Outcome of a single upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Updated,
    Inserted,
}

/// Ordered property storage.
///
/// Names are unique only by convention in templates, so every entry is
/// kept; the index points at the last entry carrying a given name, which is
/// the one upserts write to. Entries without a string `name` are carried
/// along but never matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    entries: Vec<Value>,
    index: IndexMap<String, usize>,
    modified: bool,
}

impl PropertySet {
    pub fn from_entries(entries: Vec<Value>) -> Self {
        let mut index = IndexMap::new();
        for (position, entry) in entries.iter().enumerate() {
            if let Some(name) = entry.get(NAME_KEY).and_then(Value::as_str) {
                index.insert(name.to_string(), position);
            }
        }
        Self {
            entries,
            index,
            modified: false,
        }
    }

    pub fn into_entries(self) -> Vec<Value> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once any upsert has run.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Raw `value` of `name`, if the entry has one.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.index
            .get(name)
            .and_then(|&position| self.entries[position].get(VALUE_KEY))
    }

    /// String `value` of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(Value::as_str)
    }

    /// Distinct names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Overwrite the value of `name` in place, or append a new entry.
    pub fn upsert(&mut self, name: &str, value: impl Into<String>) -> Upsert {
        let value = Value::String(value.into());
        self.modified = true;
        if let Some(&position) = self.index.get(name)
            && let Some(fields) = self.entries[position].as_object_mut()
        {
            fields.insert(VALUE_KEY.to_string(), value);
            return Upsert::Updated;
        }
        let mut fields = Map::new();
        fields.insert(NAME_KEY.to_string(), Value::String(name.to_string()));
        fields.insert(VALUE_KEY.to_string(), value);
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(Value::Object(fields));
        Upsert::Inserted
    }
}
