use std::cell::Cell;
use std::rc::Rc;

use serde::Deserialize;

use crate::store::Store;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub store: Store,
    revision: Rc<Cell<u64>>,
}

impl AppState {
    /// A fresh store with the daemon's own listener attached: a mutation
    /// counter bumped synchronously on every store change, surfaced via
    /// `health` so a front-end can tell whether its views are stale.
    pub fn new() -> Self {
        let mut store = Store::new();
        let revision = Rc::new(Cell::new(0u64));
        let counter = Rc::clone(&revision);
        store.subscribe(Box::new(move |_event| {
            counter.set(counter.get() + 1);
        }));
        AppState { store, revision }
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new()
    }
}
