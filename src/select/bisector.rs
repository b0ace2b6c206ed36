use super::path::{Key, SelectionPath};
use super::selector::StateSelector;
use crate::config::{Config, Mode};

/// Builds per-instance selectors over normalized state.
///
/// Normalized state keys same-typed entities by instance id under a common
/// root; `for_id` appends the id to the root path.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use storemux::create_state_bisector;
///
/// let state = json!({ "widgets": { "w1": { "open": true } } });
/// let widgets = create_state_bisector(["widgets"]);
///
/// let w1 = widgets.for_id("w1");
/// assert_eq!(w1.select(&state, None).unwrap(), Some(json!({ "open": true })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateBisector {
    root: SelectionPath,
    mode: Mode,
}

impl StateBisector {
    /// Create a bisector whose mode comes from the default [`Config`].
    pub fn new(root: SelectionPath) -> Self {
        Self::with_config(root, Config::default())
    }

    /// Create a bisector using the mode from `config`.
    pub fn with_config(root: SelectionPath, config: Config) -> Self {
        Self {
            root,
            mode: config.mode,
        }
    }

    /// The root path shared by every instance.
    pub fn path(&self) -> &SelectionPath {
        &self.root
    }

    /// Selector for the instance identified by `id`.
    pub fn for_id(&self, id: impl Into<Key>) -> StateSelector {
        StateSelector::with_mode(self.root.join(id), self.mode)
    }
}

/// Create a bisector rooted at the path formed by `keys` (possibly empty).
pub fn create_state_bisector<I, K>(keys: I) -> StateBisector
where
    I: IntoIterator<Item = K>,
    K: Into<Key>,
{
    StateBisector::new(SelectionPath::new(keys))
}
