use serde::Deserialize;

use crate::error::EngineError;

/// Root configuration — parsed from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// HTTP API port.
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Prefix of the REST routes (`{prefix}/data`).
    #[serde(default = "default_rest_prefix")]
    pub rest_prefix: String,

    /// Request header whose value is appended to indexed lookups.
    #[serde(default = "default_suffix_header")]
    pub suffix_header: String,

    /// Initial store contents.
    #[serde(default)]
    pub seed: Vec<String>,

    #[serde(default)]
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsConfig {
    /// eventA / eventB append their payload to the store.
    #[serde(default)]
    pub store_payloads: bool,
}

fn default_api_port() -> u16 {
    8080
}

fn default_rest_prefix() -> String {
    "/v1/demo".to_string()
}

fn default_suffix_header() -> String {
    "my-header".to_string()
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            rest_prefix: default_rest_prefix(),
            suffix_header: default_suffix_header(),
            seed: Vec::new(),
            events: EventsConfig::default(),
        }
    }
}

impl IngestConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{path}: {e}")))?;
        Self::parse(&content).map_err(|e| e.with_context(path))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.rest_prefix.is_empty()
            && (!self.rest_prefix.starts_with('/') || self.rest_prefix.ends_with('/'))
        {
            return Err(EngineError::Config(format!(
                "rest_prefix '{}' must start with '/' and must not end with '/'",
                self.rest_prefix
            )));
        }
        if let Some(segment) = self.rest_prefix.split('/').skip(1).find(|segment| {
            segment.is_empty()
                || segment.starts_with([':', '*'])
                || segment.contains(['{', '}'])
        }) {
            return Err(EngineError::Config(format!(
                "rest_prefix '{}' has invalid segment '{segment}': \
                 segments must be non-empty literals without '{{', '}}' or a leading ':' / '*'",
                self.rest_prefix
            )));
        }
        if self.suffix_header.trim().is_empty() {
            return Err(EngineError::Config("suffix_header must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(IngestConfig::parse("").unwrap(), IngestConfig::default());
    }

    #[test]
    fn parse_full_document() {
        let config = IngestConfig::parse(
            r#"
            api_port = 9000
            rest_prefix = "/api"
            suffix_header = "x-suffix"
            seed = ["a", "b"]

            [events]
            store_payloads = true
            "#,
        )
        .unwrap();

        assert_eq!(config.api_port, 9000);
        assert_eq!(config.rest_prefix, "/api");
        assert_eq!(config.suffix_header, "x-suffix");
        assert_eq!(config.seed, vec!["a", "b"]);
        assert!(config.events.store_payloads);
    }

    #[test]
    fn empty_prefix_is_allowed() {
        assert!(IngestConfig::parse(r#"rest_prefix = """#).is_ok());
    }

    #[test]
    fn nested_literal_prefix_is_allowed() {
        let config = IngestConfig::parse(r#"rest_prefix = "/v1/demo-2.api""#).unwrap();
        assert_eq!(config.rest_prefix, "/v1/demo-2.api");
    }

    #[test]
    fn rejects_bad_prefix() {
        for prefix in [
            "api", "/api/", "/", "/:v1", "/*rest", "/a{", "/a}", "/{id}", "/v1//demo", "/v1/:x",
        ] {
            let err = IngestConfig::parse(&format!("rest_prefix = \"{prefix}\"")).unwrap_err();
            assert!(matches!(err, EngineError::Config(_)), "{prefix}");
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(IngestConfig::parse("api_prot = 1").is_err());
    }

    #[test]
    fn load_missing_file() {
        let err = IngestConfig::load("/nonexistent/ingest.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ingest.toml"));
    }
}
