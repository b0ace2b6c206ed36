use std::sync::Arc;

use serde_json::Value;

use super::Subscription;

/// Callback invoked by a store after its state changes.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// A state container that dispatches actions, exposes its current state and
/// accepts change subscriptions.
///
/// The reducer and action machinery behind a store live outside this crate.
///
/// # Examples
///
/// ```
/// use std::convert::Infallible;
/// use std::sync::{Arc, RwLock};
///
/// use serde_json::{json, Value};
/// use storemux::{Listener, Store, Subscription};
///
/// struct Counter(Arc<RwLock<i64>>);
///
/// impl Store for Counter {
///     type Action = i64;
///     type Output = i64;
///     type Error = Infallible;
///
///     fn dispatch(&self, by: i64) -> Result<i64, Infallible> {
///         let mut count = self.0.write().unwrap();
///         *count += by;
///         Ok(*count)
///     }
///
///     fn get_state(&self) -> Value {
///         json!({ "count": *self.0.read().unwrap() })
///     }
///
///     fn subscribe(&self, _listener: Listener) -> Subscription {
///         Subscription::noop()
///     }
/// }
///
/// let counter = Counter(Arc::new(RwLock::new(0)));
/// assert_eq!(counter.dispatch(2).unwrap(), 2);
/// assert_eq!(counter.get_state(), json!({ "count": 2 }));
/// ```
pub trait Store {
    type Action;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Apply an action to the store.
    fn dispatch(&self, action: Self::Action) -> Result<Self::Output, Self::Error>;

    /// Snapshot of the current state.
    fn get_state(&self) -> Value;

    /// Register a listener; dropping the returned handle unregisters it.
    fn subscribe(&self, listener: Listener) -> Subscription;
}

impl<S: Store + ?Sized> Store for &S {
    type Action = S::Action;
    type Output = S::Output;
    type Error = S::Error;

    fn dispatch(&self, action: Self::Action) -> Result<Self::Output, Self::Error> {
        (**self).dispatch(action)
    }

    fn get_state(&self) -> Value {
        (**self).get_state()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        (**self).subscribe(listener)
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    type Action = S::Action;
    type Output = S::Output;
    type Error = S::Error;

    fn dispatch(&self, action: Self::Action) -> Result<Self::Output, Self::Error> {
        (**self).dispatch(action)
    }

    fn get_state(&self) -> Value {
        (**self).get_state()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        (**self).subscribe(listener)
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    type Action = S::Action;
    type Output = S::Output;
    type Error = S::Error;

    fn dispatch(&self, action: Self::Action) -> Result<Self::Output, Self::Error> {
        (**self).dispatch(action)
    }

    fn get_state(&self) -> Value {
        (**self).get_state()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        (**self).subscribe(listener)
    }
}
