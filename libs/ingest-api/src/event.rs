/// Separator between the service part and the topic part of an event source.
pub const TOPIC_SEPARATOR: char = '#';

/// Cloud-style event: a source identifier plus an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: String,
    pub data: Vec<u8>,
}

impl Event {
    pub fn new(source: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            source: source.into(),
            data: data.into(),
        }
    }

    /// Topic token: everything after the first separator.
    ///
    /// `None` when the source has no separator. `"svc#a#b"` yields `"a#b"`,
    /// `"svc#"` yields the empty topic.
    pub fn topic(&self) -> Option<&str> {
        self.source
            .split_once(TOPIC_SEPARATOR)
            .map(|(_, topic)| topic)
    }
}
