use std::ops::Index;

use indexmap::map::{IntoIter, Iter};
use indexmap::IndexMap;

/// Per-store results of a multiplexed dispatch, in dispatch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched<O> {
    outputs: IndexMap<String, O>,
}

impl<O> Dispatched<O> {
    pub(crate) fn new() -> Self {
        Self {
            outputs: IndexMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: String, output: O) {
        self.outputs.insert(name, output);
    }

    /// The output of the store registered under `name`.
    pub fn get(&self, name: &str) -> Option<&O> {
        self.outputs.get(name)
    }

    /// Names of the stores that produced an output, in dispatch order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }

    /// Name and output pairs in dispatch order.
    pub fn iter(&self) -> Iter<'_, String, O> {
        self.outputs.iter()
    }

    /// Number of outputs.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether no store produced an output.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// The underlying ordered map.
    pub fn into_inner(self) -> IndexMap<String, O> {
        self.outputs
    }
}

impl<O> Default for Dispatched<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Index<&str> for Dispatched<O> {
    type Output = O;

    fn index(&self, name: &str) -> &O {
        &self.outputs[name]
    }
}

impl<O> IntoIterator for Dispatched<O> {
    type Item = (String, O);
    type IntoIter = IntoIter<String, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.outputs.into_iter()
    }
}

impl<'a, O> IntoIterator for &'a Dispatched<O> {
    type Item = (&'a String, &'a O);
    type IntoIter = Iter<'a, String, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.outputs.iter()
    }
}
