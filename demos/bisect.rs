//! Bisecting a shared application store into per-feature views

use std::convert::Infallible;
use std::sync::RwLock;

use serde_json::{json, Value};
use storemux::{bisect_store, create_state_bisector, Listener, Store, Subscription};
use tracing_subscriber::EnvFilter;

/// Store whose actions are whole replacement values at a pointer path.
struct AppStore {
    state: RwLock<Value>,
}

impl Store for AppStore {
    type Action = (&'static str, Value);
    type Output = ();
    type Error = Infallible;

    fn dispatch(&self, (pointer, value): (&'static str, Value)) -> Result<(), Infallible> {
        let mut state = self.state.write().unwrap();
        if let Some(slot) = state.pointer_mut(pointer) {
            *slot = value;
        }
        Ok(())
    }

    fn get_state(&self) -> Value {
        self.state.read().unwrap().clone()
    }

    fn subscribe(&self, _listener: Listener) -> Subscription {
        Subscription::noop()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Bisect Example ===\n");

    let app = AppStore {
        state: RwLock::new(json!({
            "editor": { "text": "hello", "dirty": false },
            "widgets": {
                "clock": { "visible": true },
                "weather": { "visible": false, "city": "Oslo" }
            }
        })),
    };

    // A view over the editor subtree that still dispatches to the app store
    let editor = bisect_store(["editor"]).bisect(&app, None).unwrap();
    println!("Editor: {}", editor.get_state());

    editor
        .dispatch(("/editor/text", json!("hello, world")))
        .unwrap();
    println!("Editor after dispatch: {}", editor.get_state());

    // Per-instance lookups over normalized widget state
    let widgets = create_state_bisector(["widgets"]);
    let state = app.get_state();
    for id in ["clock", "weather", "calendar"] {
        let widget = widgets
            .for_id(id)
            .select_or(&state, json!({ "visible": false }))
            .unwrap();
        println!("Widget {id}: {widget}");
    }
}
