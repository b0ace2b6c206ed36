use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One step of a selection path: a field name or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Index(usize),
    Name(String),
}

impl Key {
    /// Look this key up in `value`.
    ///
    /// Names index arrays when they spell an index, and indices address
    /// object fields by their decimal name. Scalars have no children.
    pub fn lookup<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        match (self, value) {
            (Key::Name(name), Value::Object(map)) => map.get(name),
            (Key::Name(name), Value::Array(items)) => {
                parse_index(name).and_then(|index| items.get(index))
            }
            (Key::Index(index), Value::Array(items)) => items.get(*index),
            (Key::Index(index), Value::Object(map)) => map.get(&index.to_string()),
            _ => None,
        }
    }
}

fn parse_index(name: &str) -> Option<usize> {
    name.parse::<usize>()
        .ok()
        .filter(|index| index.to_string() == name)
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Key::Name(name.clone())
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

/// Whether a state value counts as present.
///
/// `null`, `false`, zero and the empty string are treated as absent; every
/// array and object, including empty ones, is present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Ordered keys locating a node in a state tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionPath(Vec<Key>);

impl SelectionPath {
    /// Build a path from keys in order.
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        keys.into_iter().collect()
    }

    /// This path with `key` appended.
    pub fn join(&self, key: impl Into<Key>) -> Self {
        let mut keys = self.0.clone();
        keys.push(key.into());
        SelectionPath(keys)
    }

    /// The keys as a slice.
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Iterate over the keys in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.0.iter()
    }

    /// The root key, if any.
    pub fn first(&self) -> Option<&Key> {
        self.0.first()
    }

    /// Number of keys in the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<Key>> FromIterator<K> for SelectionPath {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        SelectionPath(keys.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a SelectionPath {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for SelectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (position, key) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}")?;
        }
        f.write_str("]")
    }
}
