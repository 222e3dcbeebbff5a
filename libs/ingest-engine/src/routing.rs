use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ingest_api::handler::EventHandler;

/// Routing key derived from an event source.
///
/// Known topics are variants; anything else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteTopic {
    Inbox,
    Avro,
    Other(String),
}

impl RouteTopic {
    pub fn parse(token: &str) -> Self {
        match token {
            "inbox" => RouteTopic::Inbox,
            "avro" => RouteTopic::Avro,
            other => RouteTopic::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RouteTopic::Inbox => "inbox",
            RouteTopic::Avro => "avro",
            RouteTopic::Other(s) => s,
        }
    }
}

impl fmt::Display for RouteTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which handler a dispatch ended up in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A table entry matched.
    Routed { topic: RouteTopic, handler: String },
    /// No entry matched; the default handler ran.
    Fallback { topic: RouteTopic },
}

/// Immutable topic → handler table with a default handler.
pub struct RoutingTable {
    routes: HashMap<RouteTopic, Arc<dyn EventHandler>>,
    fallback: Arc<dyn EventHandler>,
}

impl fmt::Debug for RoutingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingTable")
            .field("routes", &self.routes.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl RoutingTable {
    pub fn builder(fallback: Arc<dyn EventHandler>) -> RoutingTableBuilder {
        RoutingTableBuilder {
            routes: HashMap::new(),
            fallback,
        }
    }

    /// Invoke the handler bound to `topic`, or the default handler.
    pub fn dispatch(&self, topic: &str, payload: &str) -> Dispatch {
        let topic = RouteTopic::parse(topic);
        match self.routes.get(&topic) {
            Some(handler) => {
                handler.handle(payload);
                Dispatch::Routed {
                    handler: handler.name().to_string(),
                    topic,
                }
            }
            None => {
                self.fallback.handle(payload);
                Dispatch::Fallback { topic }
            }
        }
    }

    pub fn handler(&self, topic: &RouteTopic) -> Option<&Arc<dyn EventHandler>> {
        self.routes.get(topic)
    }

    /// Routed handler by its own name, for direct invocation.
    pub fn handler_named(&self, name: &str) -> Option<&Arc<dyn EventHandler>> {
        self.routes.values().find(|h| h.name() == name)
    }

    pub fn topics(&self) -> Vec<&RouteTopic> {
        self.routes.keys().collect()
    }
}

pub struct RoutingTableBuilder {
    routes: HashMap<RouteTopic, Arc<dyn EventHandler>>,
    fallback: Arc<dyn EventHandler>,
}

impl RoutingTableBuilder {
    pub fn route(mut self, topic: RouteTopic, handler: Arc<dyn EventHandler>) -> Self {
        self.routes.insert(topic, handler);
        self
    }

    pub fn build(self) -> RoutingTable {
        RoutingTable {
            routes: self.routes,
            fallback: self.fallback,
        }
    }
}
