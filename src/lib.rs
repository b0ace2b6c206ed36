//! # storemux
//!
//! Composition helpers for state containers that dispatch actions, expose
//! their state and accept change subscriptions.
//!
//! ## Multiplexing
//!
//! Drive several named stores as one:
//! - `Multiplexer<S>` - Dispatch to and collect state from every store
//! - `select` / `select_first` - Pick stores by name in requested order
//! - Configurable failure policy for fan-out dispatch
//!
//! ## Bisection
//!
//! Narrow state to a subtree:
//! - `StateSelector` - Walk a key path through a state tree
//! - `BisectedStore<S>` - A store whose state is a live subtree of its parent
//! - `StateBisector` - Per-instance selectors over normalized state
//!
//! Every derived store implements [`Store`] itself, so multiplexers and
//! bisected stores nest freely.

pub mod bisect;
pub mod config;
pub mod error;
pub mod multiplex;
pub mod select;
pub mod store;

// Re-export main types for convenience
pub use bisect::{bisect_store, BisectedStore, StoreBisector};
pub use config::{Config, DispatchPolicy, Mode};
pub use error::{DispatchError, Error, PreconditionKind, Result};
pub use multiplex::{create_store_multiplexer, Dispatched, Multiplexer};
pub use select::{
    create_state_bisector, create_state_selector, is_truthy, Key, SelectionPath, StateBisector,
    StateSelector,
};
pub use store::{Listener, Store, Subscription};
