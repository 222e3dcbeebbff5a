use ingest_api::error::RouteError;
use ingest_api::event::Event;

use crate::routing::{Dispatch, RoutingTable};

/// What happened to a routed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Dispatched(Dispatch),
    /// Source had no topic separator; nothing was invoked.
    Dropped,
}

/// Extracts the topic from an event source and dispatches the decoded payload.
#[derive(Debug)]
pub struct EventRouter {
    table: RoutingTable,
}

impl EventRouter {
    pub fn new(table: RoutingTable) -> Self {
        tracing::info!(topics = ?table.topics(), "event router is starting");
        Self { table }
    }

    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    pub fn route(&self, event: Event) -> Result<RouteOutcome, RouteError> {
        let Some(topic) = event.topic().map(str::to_owned) else {
            tracing::warn!(source = %event.source, "unmanaged source, missing # separator");
            return Ok(RouteOutcome::Dropped);
        };

        let data = String::from_utf8(event.data)?;
        tracing::info!(source = %event.source, data = %data, "router invoked");
        tracing::info!(topic = %topic, "routing to topic");

        Ok(RouteOutcome::Dispatched(self.table.dispatch(&topic, &data)))
    }
}
