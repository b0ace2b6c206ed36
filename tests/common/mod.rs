//! Reducer-driven store shared by the integration tests.

#![allow(dead_code)]

use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use serde_json::{json, Value};
use storemux::{Listener, Store, Subscription};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("reducer rejected action '{0}'")]
pub struct Rejected(pub String);

type Reducer = Box<dyn Fn(&mut Value, &str) -> Result<(), Rejected> + Send + Sync>;

/// Applies string actions through a reducer and notifies listeners after
/// every successful dispatch.
pub struct ReducerStore {
    state: RwLock<Value>,
    reducer: Reducer,
    listeners: Arc<Mutex<Vec<(usize, Listener)>>>,
    next_id: Mutex<usize>,
    log: Arc<Mutex<Vec<String>>>,
    name: String,
}

impl ReducerStore {
    pub fn new<F>(name: &str, initial: Value, reducer: F) -> Self
    where
        F: Fn(&mut Value, &str) -> Result<(), Rejected> + Send + Sync + 'static,
    {
        Self {
            state: RwLock::new(initial),
            reducer: Box::new(reducer),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: Mutex::new(0),
            log: Arc::new(Mutex::new(Vec::new())),
            name: name.to_string(),
        }
    }

    /// Counter at `{ "count": n }` handling INCREMENT and RESET.
    pub fn counter(name: &str) -> Self {
        Self::new(name, json!({ "count": 0 }), |state, action| {
            match action {
                "INCREMENT" => {
                    let next = state["count"].as_i64().unwrap_or(0) + 1;
                    state["count"] = json!(next);
                }
                "RESET" => state["count"] = json!(0),
                _ => {}
            }
            Ok(())
        })
    }

    /// Rejects every action.
    pub fn rejecting(name: &str) -> Self {
        Self::new(name, json!({}), |_, action| Err(Rejected(action.to_string())))
    }

    /// Share a dispatch log with other stores to observe cross-store order.
    pub fn with_log(mut self, log: Arc<Mutex<Vec<String>>>) -> Self {
        self.log = log;
        self
    }

    pub fn replace_state(&self, state: Value) {
        *self.state.write().unwrap() = state;
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

impl fmt::Debug for ReducerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerStore")
            .field("name", &self.name)
            .field("state", &*self.state.read().unwrap())
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

impl Store for ReducerStore {
    type Action = &'static str;
    type Output = Value;
    type Error = Rejected;

    fn dispatch(&self, action: &'static str) -> Result<Value, Rejected> {
        self.log.lock().unwrap().push(format!("{}:{}", self.name, action));
        let next = {
            let mut state = self.state.write().unwrap();
            (self.reducer)(&mut *state, action)?;
            state.clone()
        };
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
        Ok(next)
    }

    fn get_state(&self) -> Value {
        self.state.read().unwrap().clone()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            *next_id
        };
        self.listeners.lock().unwrap().push((id, listener));
        let listeners = Arc::clone(&self.listeners);
        Subscription::new(move || {
            listeners.lock().unwrap().retain(|(existing, _)| *existing != id);
        })
    }
}
