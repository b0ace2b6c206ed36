//! Narrowed views over a parent store.
//!
//! A [`BisectedStore`] forwards dispatches and subscriptions to its parent
//! and answers `get_state` with a subtree of the parent's live state.

mod bisected;

pub use bisected::{bisect_store, BisectedStore, StoreBisector};
