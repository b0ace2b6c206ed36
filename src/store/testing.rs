//! Recording store used by unit tests.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use serde_json::Value;
use thiserror::Error;

use super::{Listener, Store, Subscription};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("store refused action")]
pub struct Refused;

/// Records every action it receives and returns the running dispatch count.
#[derive(Clone)]
pub struct RecordingStore {
    state: Arc<RwLock<Value>>,
    dispatched: Arc<Mutex<Vec<Value>>>,
    listeners: Arc<Mutex<BTreeMap<usize, Listener>>>,
    next_listener: Arc<AtomicUsize>,
    refuse: Arc<AtomicBool>,
}

impl RecordingStore {
    pub fn new(initial: Value) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            dispatched: Arc::new(Mutex::new(Vec::new())),
            listeners: Arc::new(Mutex::new(BTreeMap::new())),
            next_listener: Arc::new(AtomicUsize::new(0)),
            refuse: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A store whose every dispatch fails.
    pub fn refusing(initial: Value) -> Self {
        let store = Self::new(initial);
        store.refuse.store(true, Ordering::SeqCst);
        store
    }

    pub fn set_state(&self, state: Value) {
        *self.state.write().unwrap() = state;
        self.notify();
    }

    pub fn dispatched(&self) -> Vec<Value> {
        self.dispatched.lock().unwrap().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    fn notify(&self) {
        let listeners: Vec<Listener> = self.listeners.lock().unwrap().values().cloned().collect();
        for listener in listeners {
            listener();
        }
    }
}

impl fmt::Debug for RecordingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingStore")
            .field("state", &*self.state.read().unwrap())
            .field("dispatched", &self.dispatched.lock().unwrap().len())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Store for RecordingStore {
    type Action = Value;
    type Output = usize;
    type Error = Refused;

    fn dispatch(&self, action: Value) -> Result<usize, Refused> {
        if self.refuse.load(Ordering::SeqCst) {
            return Err(Refused);
        }
        let count = {
            let mut dispatched = self.dispatched.lock().unwrap();
            dispatched.push(action);
            dispatched.len()
        };
        self.notify();
        Ok(count)
    }

    fn get_state(&self) -> Value {
        self.state.read().unwrap().clone()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = self.next_listener.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().unwrap().insert(id, listener);
        let listeners = Arc::clone(&self.listeners);
        Subscription::new(move || {
            listeners.lock().unwrap().remove(&id);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn debug_shows_state_and_counts() {
        let store = RecordingStore::new(json!({ "n": 1 }));
        store.dispatch(json!("PING")).unwrap();
        let rendered = format!("{store:?}");
        assert!(rendered.contains("RecordingStore"));
        assert!(rendered.contains("dispatched: 1"));
        assert!(rendered.contains("listeners: 0"));
    }
}
