// marl-parser - Association map keyed by structural equality
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Maps for marl values.
//!
//! Keys are found by a linear scan comparing with value equality, never by
//! hashing, so any value may be used as a key. Insertion order is kept for
//! printing but plays no part in equality.

use im::Vector;

use crate::value::MarlVal;

/// A persistent map of key/value pairs.
#[derive(Clone, Default)]
pub struct MarlMap {
    entries: Vector<(MarlVal, MarlVal)>,
}

impl MarlMap {
    /// Create an empty map.
    pub fn new() -> Self {
        MarlMap {
            entries: Vector::new(),
        }
    }

    /// Build a map from pairs. A repeated key keeps its last value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (MarlVal, MarlVal)>) -> Self {
        let mut map = MarlMap::new();
        for (key, value) in pairs {
            map.insert(key, value);
        }
        map
    }

    fn position(&self, key: &MarlVal) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Look up the value bound to `key`.
    pub fn get(&self, key: &MarlVal) -> Option<&MarlVal> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &MarlVal) -> bool {
        self.position(key).is_some()
    }

    /// Bind `key` to `value`, replacing any existing binding for an equal key.
    pub fn insert(&mut self, key: MarlVal, value: MarlVal) {
        match self.position(&key) {
            Some(index) => {
                self.entries.set(index, (key, value));
            }
            None => self.entries.push_back((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MarlVal, &MarlVal)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &MarlVal> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &MarlVal> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl PartialEq for MarlMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl FromIterator<(MarlVal, MarlVal)> for MarlMap {
    fn from_iter<I: IntoIterator<Item = (MarlVal, MarlVal)>>(iter: I) -> Self {
        MarlMap::from_pairs(iter)
    }
}
