/// Out-of-range index lookup on the value store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid index {index} (size is {size})")]
pub struct NotFound {
    pub index: i64,
    pub size: usize,
}

/// Failure while routing a single event.
///
/// Unmatched topics and sources without a separator are not errors:
/// they are logged and the event is dropped or handed to the default handler.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("event payload is not valid UTF-8: {0}")]
    Decoding(#[from] std::string::FromUtf8Error),
}
