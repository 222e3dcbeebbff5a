use std::sync::Arc;

use ingest_api::handler::EventHandler;

use crate::store::ValueStore;

pub const EVENT_A: &str = "eventA";
pub const EVENT_B: &str = "eventB";

/// Built-in handler that acknowledges receipt of a payload.
///
/// With a store attached the payload is also appended to it.
#[derive(Debug)]
pub struct AckHandler {
    name: &'static str,
    store: Option<Arc<ValueStore>>,
}

impl AckHandler {
    pub fn event_a() -> Self {
        Self {
            name: EVENT_A,
            store: None,
        }
    }

    pub fn event_b() -> Self {
        Self {
            name: EVENT_B,
            store: None,
        }
    }

    pub fn recording_into(mut self, store: Arc<ValueStore>) -> Self {
        self.store = Some(store);
        self
    }
}

impl EventHandler for AckHandler {
    fn name(&self) -> &str {
        self.name
    }

    fn handle(&self, payload: &str) {
        tracing::info!(handler = self.name, "{} invoked with {}", self.name, payload);
        if let Some(store) = &self.store {
            store.append(payload);
        }
    }
}

/// Default handler: warns and does nothing else.
#[derive(Debug, Default)]
pub struct UnmatchedHandler;

impl EventHandler for UnmatchedHandler {
    fn name(&self) -> &str {
        "unmatched"
    }

    fn handle(&self, payload: &str) {
        tracing::warn!(data = %payload, "no matching handler found");
    }
}
