use clap::{Args, Parser, Subcommand};

use ingest_engine::config::IngestConfig;

use crate::error::ServerError;

#[derive(Parser)]
#[command(name = "ingest-server", about = "In-memory value list with REST, function and event interfaces")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default).
    Serve(ServeArgs),
    /// Parse and validate the configuration, then exit.
    CheckConfig(ServeArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Serve(ServeArgs::default())
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct ServeArgs {
    /// Path to TOML config file. Built-in defaults when omitted.
    #[arg(long, env = "INGEST_CONFIG")]
    pub config: Option<String>,

    /// Override `api_port` from the config file.
    #[arg(long, env = "INGEST_PORT")]
    pub port: Option<u16>,
}

impl ServeArgs {
    pub fn load_config(&self) -> Result<IngestConfig, ServerError> {
        let mut config = match &self.config {
            Some(path) => {
                let config = IngestConfig::load(path)?;
                tracing::info!(config = %path, "loaded config");
                config
            }
            None => {
                tracing::info!("no config file given, using defaults");
                IngestConfig::default()
            }
        };
        if let Some(port) = self.port {
            config.api_port = port;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["ingest-server"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(Commands::default(), Commands::Serve(_)));
    }

    #[test]
    fn port_override() {
        let cli = Cli::try_parse_from(["ingest-server", "serve", "--port", "9999"]).unwrap();
        let Some(Commands::Serve(args)) = cli.command else {
            panic!("expected serve");
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.api_port, 9999);
        assert_eq!(config.rest_prefix, "/v1/demo");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = ServeArgs {
            config: Some("/nonexistent/ingest.toml".into()),
            port: None,
        };
        assert!(matches!(args.load_config(), Err(ServerError::Engine(_))));
    }
}
