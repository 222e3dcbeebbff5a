use std::sync::Arc;

use ingest_api::handler::EventHandler;

use crate::config::IngestConfig;
use crate::error::EngineError;
use crate::facade::QueryFacade;
use crate::handlers::{AckHandler, UnmatchedHandler};
use crate::router::EventRouter;
use crate::routing::{RouteTopic, RoutingTable};
use crate::store::ValueStore;

/// Components built once at startup and shared by every interface.
#[derive(Debug)]
pub struct Engine {
    facade: QueryFacade,
    router: EventRouter,
    config: IngestConfig,
}

impl Engine {
    /// Build the store, the routing table and the facade from configuration.
    pub fn bootstrap(config: IngestConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let store = Arc::new(ValueStore::with_values(config.seed.iter().cloned()));
        tracing::info!(values = store.len(), "value store is starting");

        let mut event_a = AckHandler::event_a();
        let mut event_b = AckHandler::event_b();
        if config.events.store_payloads {
            event_a = event_a.recording_into(store.clone());
            event_b = event_b.recording_into(store.clone());
        }

        let table = RoutingTable::builder(Arc::new(UnmatchedHandler))
            .route(RouteTopic::Inbox, Arc::new(event_a))
            .route(RouteTopic::Avro, Arc::new(event_b))
            .build();

        Ok(Self {
            facade: QueryFacade::new(store),
            router: EventRouter::new(table),
            config,
        })
    }

    pub fn facade(&self) -> &QueryFacade {
        &self.facade
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Built-in handler by function name (`eventA`, `eventB`).
    pub fn handler(&self, name: &str) -> Option<&Arc<dyn EventHandler>> {
        self.router.table().handler_named(name)
    }
}

#[cfg(test)]
mod tests {
    use ingest_api::event::Event;

    use super::*;
    use crate::router::RouteOutcome;
    use crate::routing::Dispatch;

    #[test]
    fn bootstrap_seeds_store() {
        let engine = Engine::bootstrap(IngestConfig {
            seed: vec!["x".into()],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(engine.facade().get_all(), vec!["x"]);
    }

    #[test]
    fn standard_table_wires_inbox_and_avro() {
        let engine = Engine::bootstrap(IngestConfig::default()).unwrap();

        let outcome = engine.router().route(Event::new("svc#avro", "p")).unwrap();
        assert_eq!(
            outcome,
            RouteOutcome::Dispatched(Dispatch::Routed {
                topic: RouteTopic::Avro,
                handler: "eventB".into()
            })
        );
        assert_eq!(engine.handler("eventA").map(|h| h.name()), Some("eventA"));
        assert!(engine.handler("router").is_none());
        // acknowledging handlers leave the store alone by default
        assert!(engine.facade().get_all().is_empty());
    }

    #[test]
    fn store_payloads_records_routed_events() {
        let mut config = IngestConfig::default();
        config.events.store_payloads = true;
        let engine = Engine::bootstrap(config).unwrap();

        engine.router().route(Event::new("svc#inbox", "a")).unwrap();
        engine.router().route(Event::new("svc#nope", "b")).unwrap();
        engine.router().route(Event::new("svc#avro", "c")).unwrap();

        assert_eq!(engine.facade().get_all(), vec!["a", "c"]);
    }

    #[test]
    fn bootstrap_rejects_invalid_config() {
        let config = IngestConfig {
            rest_prefix: "nope/".into(),
            ..Default::default()
        };
        assert!(Engine::bootstrap(config).is_err());
    }
}
