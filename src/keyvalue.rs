//! Ordered enable/key/value rows shared by query parameters and headers.
//!
//! A set is validated with the pairing rule: an enabled row must have
//! both key and value filled, or neither. Disabled rows are exempt.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable row identity within one set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// One editable row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub id: RowId,
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

impl KeyValuePair {
    fn new(id: RowId) -> Self {
        KeyValuePair {
            id,
            key: String::new(),
            value: String::new(),
            enabled: true,
        }
    }

    /// Pairing fault of this row, if any
    pub fn fault(&self) -> Option<RowFault> {
        if !self.enabled {
            return None;
        }
        match (self.key.is_empty(), self.value.is_empty()) {
            (false, true) => Some(RowFault::MissingValue),
            (true, false) => Some(RowFault::MissingKey),
            _ => None,
        }
    }

    /// Whether the row contributes to the compiled mapping
    pub fn is_complete(&self) -> bool {
        self.enabled && !self.key.is_empty() && !self.value.is_empty()
    }
}

/// Which field of a half-filled row carries the message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowFault {
    MissingKey,
    MissingValue,
}

impl RowFault {
    pub fn message(&self) -> &'static str {
        match self {
            RowFault::MissingKey => "Key is required",
            RowFault::MissingValue => "Value is required when key is provided",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowViolation {
    pub id: RowId,
    pub fault: RowFault,
}

/// Ordered collection of rows with per-set id allocation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueSet {
    rows: Vec<KeyValuePair>,
    next_id: u64,
}

impl KeyValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty, enabled row and return its id
    pub fn add(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(KeyValuePair::new(id));
        id
    }

    /// Append a filled row
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> RowId {
        let id = self.add();
        if let Some(row) = self.get_mut(id) {
            row.key = key.into();
            row.value = value.into();
        }
        id
    }

    pub fn get(&self, id: RowId) -> Option<&KeyValuePair> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn get_mut(&mut self, id: RowId) -> Option<&mut KeyValuePair> {
        self.rows.iter_mut().find(|row| row.id == id)
    }

    /// Row at display position
    pub fn at(&self, index: usize) -> Option<&KeyValuePair> {
        self.rows.get(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut KeyValuePair> {
        self.rows.get_mut(index)
    }

    pub fn set_key(&mut self, id: RowId, key: impl Into<String>) {
        if let Some(row) = self.get_mut(id) {
            row.key = key.into();
        }
    }

    pub fn set_value(&mut self, id: RowId, value: impl Into<String>) {
        if let Some(row) = self.get_mut(id) {
            row.value = value.into();
        }
    }

    pub fn set_enabled(&mut self, id: RowId, enabled: bool) {
        if let Some(row) = self.get_mut(id) {
            row.enabled = enabled;
        }
    }

    pub fn toggle(&mut self, id: RowId) {
        if let Some(row) = self.get_mut(id) {
            row.enabled = !row.enabled;
        }
    }

    /// Remove a row; returns whether it existed
    pub fn remove(&mut self, id: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyValuePair> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Enabled rows with a key, as counted on the tab badge
    pub fn active_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.enabled && !row.key.is_empty())
            .count()
    }

    /// Rows currently breaking the pairing rule, evaluated from scratch
    pub fn violations(&self) -> Vec<RowViolation> {
        self.rows
            .iter()
            .filter_map(|row| row.fault().map(|fault| RowViolation { id: row.id, fault }))
            .collect()
    }

    /// Fold complete rows into a mapping; later duplicates overwrite earlier ones
    pub fn fold(&self) -> IndexMap<String, String> {
        let mut map = IndexMap::new();
        for row in self.rows.iter().filter(|row| row.is_complete()) {
            map.insert(row.key.clone(), row.value.clone());
        }
        map
    }
}

impl<'a> IntoIterator for &'a KeyValueSet {
    type Item = &'a KeyValuePair;
    type IntoIter = std::slice::Iter<'a, KeyValuePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
