use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

/// Cache of server-derived data that must not outlive a session.
pub trait QueryCache {
    /// Drop every cached entry.
    fn invalidate_all(&self);
}

/// In-memory query cache keyed by query name.
#[derive(Debug, Default)]
pub struct QueryClient {
    entries: RefCell<HashMap<String, Value>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_query_data(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn set_query_data(&self, key: impl Into<String>, data: Value) {
        self.entries.borrow_mut().insert(key.into(), data);
    }
}

impl QueryCache for QueryClient {
    fn invalidate_all(&self) {
        let dropped = {
            let mut entries = self.entries.borrow_mut();
            let count = entries.len();
            entries.clear();
            count
        };
        tracing::debug!("Query cache cleared ({dropped} entries)");
    }
}
