//! The store capability contract.
//!
//! Every store handed to this crate, and every store it derives, implements
//! [`Store`]. Derived stores can therefore be bisected or multiplexed again
//! without special cases.

mod contract;
mod subscription;

#[cfg(test)]
pub(crate) mod testing;

pub use contract::{Listener, Store};
pub use subscription::Subscription;
