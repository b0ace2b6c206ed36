//! Fan-out over a set of named stores.
//!
//! A [`Multiplexer`] dispatches to and collects state from every store it
//! holds, while still handing out each store by name.

mod dispatched;
mod multiplexer;

pub use dispatched::Dispatched;
pub use multiplexer::{create_store_multiplexer, Multiplexer};
