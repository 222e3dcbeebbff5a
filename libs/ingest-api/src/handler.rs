/// A unit of behavior invoked with a decoded event payload.
///
/// Handlers return nothing; their effect is logging or a store mutation.
pub trait EventHandler: Send + Sync {
    /// Name used in logs and for direct invocation (e.g. `"eventA"`).
    fn name(&self) -> &str;

    fn handle(&self, payload: &str);
}
