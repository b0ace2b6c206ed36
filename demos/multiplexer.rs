//! Multiplexer example with several application stores

use std::sync::{Arc, Mutex, RwLock};

use serde_json::{json, Value};
use storemux::{create_store_multiplexer, Listener, Store, Subscription};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
#[error("unknown action '{0}'")]
struct UnknownAction(String);

/// Minimal store keeping a count and a list of listeners.
struct CounterStore {
    count: RwLock<i64>,
    listeners: Arc<Mutex<Vec<Listener>>>,
}

impl CounterStore {
    fn new(start: i64) -> Self {
        Self {
            count: RwLock::new(start),
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Store for CounterStore {
    type Action = String;
    type Output = i64;
    type Error = UnknownAction;

    fn dispatch(&self, action: String) -> Result<i64, UnknownAction> {
        let next = {
            let mut count = self.count.write().unwrap();
            match action.as_str() {
                "INCREMENT" => *count += 1,
                "DECREMENT" => *count -= 1,
                _ => return Err(UnknownAction(action)),
            }
            *count
        };
        for listener in self.listeners.lock().unwrap().iter() {
            listener();
        }
        Ok(next)
    }

    fn get_state(&self) -> Value {
        json!({ "count": *self.count.read().unwrap() })
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.listeners.lock().unwrap().push(listener);
        Subscription::noop()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Multiplexer Example ===\n");

    let stores = create_store_multiplexer([
        ("app", CounterStore::new(0)),
        ("session", CounterStore::new(10)),
        ("local", CounterStore::new(100)),
    ]);

    // Dispatch to every store at once
    let outputs = stores.dispatch("INCREMENT".to_string()).unwrap();
    for (name, count) in &outputs {
        println!("{name} -> {count}");
    }

    // Each store is still reachable on its own
    stores["app"].dispatch("INCREMENT".to_string()).unwrap();
    println!("\nAll state: {:#}", stores.get_state());

    // Pick a store by preference
    let preferred = stores.select_first(["fast", "session"]).unwrap();
    println!("\nPreferred store state: {}", preferred.get_state());

    // Unknown names are reported with the configured names
    if let Err(err) = stores.select_first(["fast"]) {
        println!("\nLookup failed: {err}");
    }

    // A failing store stops the fan-out
    if let Err(err) = stores.dispatch("RESET".to_string()) {
        println!("\nDispatch failed: {err}");
    }
}
