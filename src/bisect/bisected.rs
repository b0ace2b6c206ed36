use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, PreconditionKind, Result};
use crate::select::{Key, SelectionPath, StateSelector};
use crate::store::{Listener, Store, Subscription};

/// First stage of bisection: holds the selection path until a store is
/// supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreBisector {
    path: SelectionPath,
    config: Config,
}

impl StoreBisector {
    /// Create a bisector whose mode comes from the default [`Config`].
    pub fn new(path: SelectionPath) -> Self {
        Self::with_config(path, Config::default())
    }

    /// Create a bisector with an explicit [`Config`].
    pub fn with_config(path: SelectionPath, config: Config) -> Self {
        Self { path, config }
    }

    /// The path selected from the parent state.
    pub fn path(&self) -> &SelectionPath {
        &self.path
    }

    /// Wrap `store` so its state is narrowed to this bisector's path.
    ///
    /// `default` replaces the selected state whenever the path does not
    /// resolve to a present value.
    pub fn bisect<S: Store>(&self, store: S, default: Option<Value>) -> Result<BisectedStore<S>> {
        if self.config.mode.is_strict() && self.path.is_empty() {
            return Err(Error::precondition(
                PreconditionKind::EmptyPath,
                "must define one or more keys to select on",
            ));
        }
        debug!(path = %self.path, has_default = default.is_some(), "bisecting store");
        Ok(BisectedStore {
            parent: store,
            selector: StateSelector::with_config(self.path.clone(), self.config),
            default,
        })
    }
}

/// Start a bisection over the path formed by `keys`.
///
/// # Examples
///
/// ```
/// # use std::convert::Infallible;
/// # use std::sync::{Arc, RwLock};
/// # use serde_json::{json, Value};
/// # use storemux::{Listener, Store, Subscription};
/// # struct AppStore(Arc<RwLock<Value>>);
/// # impl Store for AppStore {
/// #     type Action = Value;
/// #     type Output = ();
/// #     type Error = Infallible;
/// #     fn dispatch(&self, action: Value) -> Result<(), Infallible> {
/// #         *self.0.write().unwrap() = action;
/// #         Ok(())
/// #     }
/// #     fn get_state(&self) -> Value { self.0.read().unwrap().clone() }
/// #     fn subscribe(&self, _: Listener) -> Subscription { Subscription::noop() }
/// # }
/// use storemux::bisect_store;
///
/// let app = AppStore(Arc::new(RwLock::new(json!({ "editor": { "dirty": true } }))));
/// let editor = bisect_store(["editor"]).bisect(&app, None).unwrap();
/// assert_eq!(editor.get_state(), json!({ "dirty": true }));
///
/// editor.dispatch(json!({ "editor": { "dirty": "no" } })).unwrap();
/// assert_eq!(editor.get_state(), json!({ "dirty": "no" }));
/// ```
pub fn bisect_store<I, K>(keys: I) -> StoreBisector
where
    I: IntoIterator<Item = K>,
    K: Into<Key>,
{
    StoreBisector::new(SelectionPath::new(keys))
}

/// A store whose state is a subtree of its parent's state.
///
/// Nothing is cached: every `get_state` reads the parent's current state.
#[derive(Debug, Clone)]
pub struct BisectedStore<S> {
    parent: S,
    selector: StateSelector,
    default: Option<Value>,
}

impl<S: Store> BisectedStore<S> {
    /// The wrapped parent store.
    pub fn parent(&self) -> &S {
        &self.parent
    }

    /// The path selected from the parent state.
    pub fn path(&self) -> &SelectionPath {
        self.selector.path()
    }

    /// The value used when the path selects nothing.
    pub fn default_state(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Select from the parent's state with precondition checks applied.
    ///
    /// Returns `Ok(None)` when nothing was selected and there is no default.
    pub fn try_get_state(&self) -> Result<Option<Value>> {
        let state = self.parent.get_state();
        self.selector.select(&state, self.default.as_ref())
    }
}

impl<S: Store> Store for BisectedStore<S> {
    type Action = S::Action;
    type Output = S::Output;
    type Error = S::Error;

    fn dispatch(&self, action: Self::Action) -> std::result::Result<Self::Output, Self::Error> {
        self.parent.dispatch(action)
    }

    /// The selected subtree, or `null` when nothing was selected and there
    /// is no default.
    ///
    /// In strict mode an unresolved path is logged as a warning; use
    /// [`BisectedStore::try_get_state`] to receive it as an error.
    fn get_state(&self) -> Value {
        let state = self.parent.get_state();
        let selected = self.selector.select_unchecked(&state, self.default.as_ref());
        if selected.is_none() && self.selector.mode().is_strict() {
            if let Err(err) = self.selector.select_ref(&state, None) {
                warn!(path = %self.path(), error = %err, "bisected state is missing");
            }
        }
        selected.cloned().unwrap_or(Value::Null)
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.parent.subscribe(listener)
    }
}
