use ingest_engine::bootstrap::Engine;

use crate::config::ServeArgs;
use crate::error::ServerError;

pub fn run(args: ServeArgs) -> Result<(), ServerError> {
    let config = args.load_config()?;
    let engine = Engine::bootstrap(config)?;
    ingest_api_server::app(engine.into())?;
    tracing::info!("configuration ok");
    Ok(())
}
