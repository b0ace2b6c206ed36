//! Path selection over nested state trees.
//!
//! A [`StateSelector`] walks a [`SelectionPath`] through a state value;
//! a [`StateBisector`] builds selectors for one instance of normalized state.

mod bisector;
mod path;
mod selector;

pub use bisector::{create_state_bisector, StateBisector};
pub use path::{is_truthy, Key, SelectionPath};
pub use selector::{create_state_selector, StateSelector};
