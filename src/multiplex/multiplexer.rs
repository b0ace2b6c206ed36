use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::Dispatched;
use crate::config::{Config, DispatchPolicy};
use crate::error::{DispatchError, Error, Result};
use crate::store::{Listener, Store, Subscription};

/// An ordered set of named stores that can be driven together or one at a
/// time.
///
/// Names should be unique. When a name repeats, the later store replaces the
/// earlier one but keeps the position of the first occurrence.
///
/// # Examples
///
/// ```
/// # use std::convert::Infallible;
/// # use serde_json::{json, Value};
/// # use storemux::{Listener, Store, Subscription};
/// # struct Fixed(Value);
/// # impl Store for Fixed {
/// #     type Action = &'static str;
/// #     type Output = bool;
/// #     type Error = Infallible;
/// #     fn dispatch(&self, _: &'static str) -> Result<bool, Infallible> { Ok(true) }
/// #     fn get_state(&self) -> Value { self.0.clone() }
/// #     fn subscribe(&self, _: Listener) -> Subscription { Subscription::noop() }
/// # }
/// use storemux::create_store_multiplexer;
///
/// let stores = create_store_multiplexer([
///     ("app", Fixed(json!({ "ready": true }))),
///     ("session", Fixed(json!({ "user": "ada" }))),
/// ]);
///
/// let outputs = stores.dispatch("SOME_ACTION").unwrap();
/// assert_eq!(outputs["app"], true);
///
/// let state = stores.get_state();
/// assert_eq!(state["session"]["user"], "ada");
///
/// let session = stores.select_first(&["local", "session"]).unwrap();
/// assert_eq!(session.get_state(), json!({ "user": "ada" }));
/// ```
pub struct Multiplexer<S> {
    stores: IndexMap<String, S>,
    configured: Vec<String>,
    policy: DispatchPolicy,
}

impl<S: Store> Multiplexer<S> {
    /// Create a multiplexer over `mapping` using the default [`Config`].
    pub fn new<I, N>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
    {
        Self::with_config(mapping, Config::default())
    }

    /// Create a multiplexer over `mapping` with an explicit [`Config`].
    pub fn with_config<I, N>(mapping: I, config: Config) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
    {
        let mut stores = IndexMap::new();
        let mut configured = Vec::new();
        for (name, store) in mapping {
            let name = name.into();
            configured.push(name.clone());
            if stores.insert(name.clone(), store).is_some() && config.mode.is_strict() {
                warn!(
                    store = %name,
                    "duplicate store name in mapping; later store shadows earlier one"
                );
            }
        }
        debug!(stores = stores.len(), policy = ?config.dispatch_policy, "multiplexing stores");
        Self {
            stores,
            configured,
            policy: config.dispatch_policy,
        }
    }

    /// Dispatch `action` to every store in mapping order.
    ///
    /// Under [`DispatchPolicy::AbortOnFirstError`] the first failure stops
    /// the fan-out; under [`DispatchPolicy::CollectErrors`] every store is
    /// dispatched to before failures are reported.
    pub fn dispatch(
        &self,
        action: S::Action,
    ) -> std::result::Result<Dispatched<S::Output>, DispatchError<S::Output, S::Error>>
    where
        S::Action: Clone,
        S::Output: fmt::Debug,
    {
        let mut completed = Dispatched::new();
        let mut failures = Vec::new();
        for (name, store) in &self.stores {
            debug!(store = %name, "dispatching");
            match store.dispatch(action.clone()) {
                Ok(output) => completed.insert(name.clone(), output),
                Err(source) => {
                    warn!(store = %name, error = %source, "store dispatch failed");
                    match self.policy {
                        DispatchPolicy::AbortOnFirstError => {
                            return Err(DispatchError::Aborted {
                                store: name.clone(),
                                source,
                            });
                        }
                        DispatchPolicy::CollectErrors => failures.push((name.clone(), source)),
                    }
                }
            }
        }
        if failures.is_empty() {
            Ok(completed)
        } else {
            Err(DispatchError::Failed {
                completed,
                failures,
            })
        }
    }

    /// Current state of every store, keyed by name in mapping order.
    pub fn get_state(&self) -> Value {
        let states: Map<String, Value> = self
            .stores
            .iter()
            .map(|(name, store)| (name.clone(), store.get_state()))
            .collect();
        Value::Object(states)
    }

    /// The stores registered under `names`, in the order requested.
    ///
    /// Unknown names are skipped.
    pub fn select<I>(&self, names: I) -> Vec<&S>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| self.stores.get(name.as_ref()))
            .collect()
    }

    /// The first store, in requested order, registered under one of `names`.
    pub fn select_first<I>(&self, names: I) -> Result<&S>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut requested = Vec::new();
        for name in names {
            let name = name.as_ref();
            if let Some(store) = self.stores.get(name) {
                return Ok(store);
            }
            requested.push(name.to_string());
        }
        Err(Error::NoMatchingStore {
            configured: self.configured.clone(),
            requested,
        })
    }

    /// The store registered under `name`.
    pub fn get(&self, name: &str) -> Option<&S> {
        self.stores.get(name)
    }

    /// Unique store names in mapping order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    /// Stores with their names, in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &S)> {
        self.stores.iter().map(|(name, store)| (name.as_str(), store))
    }

    /// Number of unique store names.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether the multiplexer holds no stores.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// The policy applied when a store fails to dispatch.
    pub fn dispatch_policy(&self) -> DispatchPolicy {
        self.policy
    }
}

impl<S: Store> Index<&str> for Multiplexer<S> {
    type Output = S;

    /// # Panics
    ///
    /// Panics if no store is registered under `name`.
    fn index(&self, name: &str) -> &S {
        &self.stores[name]
    }
}

impl<S> Store for Multiplexer<S>
where
    S: Store,
    S::Action: Clone,
    S::Output: fmt::Debug + Send + Sync + 'static,
{
    type Action = S::Action;
    type Output = Dispatched<S::Output>;
    type Error = DispatchError<S::Output, S::Error>;

    fn dispatch(&self, action: Self::Action) -> std::result::Result<Self::Output, Self::Error> {
        Multiplexer::dispatch(self, action)
    }

    fn get_state(&self) -> Value {
        Multiplexer::get_state(self)
    }

    /// Registers `listener` on every store; the returned handle unregisters
    /// it from all of them.
    fn subscribe(&self, listener: Listener) -> Subscription {
        Subscription::combine(
            self.stores
                .values()
                .map(|store| store.subscribe(Arc::clone(&listener))),
        )
    }
}

impl<S: fmt::Debug> fmt::Debug for Multiplexer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multiplexer")
            .field("stores", &self.stores)
            .field("policy", &self.policy)
            .finish()
    }
}

/// Multiplex the named stores in `mapping`.
pub fn create_store_multiplexer<I, N, S>(mapping: I) -> Multiplexer<S>
where
    I: IntoIterator<Item = (N, S)>,
    N: Into<String>,
    S: Store,
{
    Multiplexer::new(mapping)
}
