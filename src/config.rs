use std::collections::HashMap;
use std::time::Duration;

use opensearch::http::Url;
use serde::Deserialize;

use crate::error::AppError;

/// Prefix of every environment variable read by [`AppConfig::from_env`].
pub const ENV_PREFIX: &str = "DOCSEARCH";

/// Service configuration.
///
/// Every field has a default; any of them can be overridden with a
/// `DOCSEARCH_<FIELD>` environment variable, e.g. `DOCSEARCH_OPENSEARCH_URL`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server listens on, as `<host>:<port>`; the host may
    /// be a hostname such as `localhost`.
    pub bind_addr: String,
    /// Base URL of the OpenSearch node.
    pub opensearch_url: String,
    /// Index holding the documents.
    pub index_name: String,
    /// Validate TLS certificates of the search engine.
    pub verify_certs: bool,
    /// How long startup waits for the engine to become healthy.
    pub ready_timeout_secs: u64,
    /// Delay between health probes.
    pub ready_interval_secs: u64,
    /// Abort startup when the engine never became healthy.
    pub require_ready: bool,
    /// Fill a newly created index with sample documents.
    pub seed_on_create: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            opensearch_url: "http://opensearch-node1:9200".to_string(),
            index_name: "documents".to_string(),
            verify_certs: false,
            ready_timeout_secs: 60,
            ready_interval_secs: 1,
            require_ready: true,
            seed_on_create: true,
        }
    }
}

impl AppConfig {
    /// Build the config from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::load(None)
    }

    /// Build the config from an explicit variable map instead of the process
    /// environment (useful for testing).
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, AppError> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<HashMap<String, String>>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let settings = ::config::Config::builder()
            .set_default("bind_addr", defaults.bind_addr)
            .and_then(|b| b.set_default("opensearch_url", defaults.opensearch_url))
            .and_then(|b| b.set_default("index_name", defaults.index_name))
            .and_then(|b| b.set_default("verify_certs", defaults.verify_certs))
            .and_then(|b| b.set_default("ready_timeout_secs", defaults.ready_timeout_secs as i64))
            .and_then(|b| b.set_default("ready_interval_secs", defaults.ready_interval_secs as i64))
            .and_then(|b| b.set_default("require_ready", defaults.require_ready))
            .and_then(|b| b.set_default("seed_on_create", defaults.seed_on_create))
            .map_err(|e| AppError::Config(e.to_string()))?
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(vars),
            )
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        // Host may be a name (resolved at bind time) or a literal IP.
        let valid_bind = self
            .bind_addr
            .rsplit_once(':')
            .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok());
        if !valid_bind {
            return Err(AppError::Config(format!(
                "bind_addr must be <host>:<port>, got '{}'",
                self.bind_addr
            )));
        }

        Url::parse(&self.opensearch_url).map_err(|e| {
            AppError::Config(format!("Invalid opensearch_url '{}': {}", self.opensearch_url, e))
        })?;

        if self.index_name.is_empty() || self.index_name != self.index_name.to_lowercase() {
            return Err(AppError::Config(format!(
                "index_name must be non-empty and lowercase, got '{}'",
                self.index_name
            )));
        }

        if self.ready_interval_secs == 0 {
            return Err(AppError::Config(
                "ready_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.ready_timeout_secs < self.ready_interval_secs {
            return Err(AppError::Config(
                "ready_timeout_secs must be at least ready_interval_secs".to_string(),
            ));
        }

        Ok(())
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    pub fn ready_interval(&self) -> Duration {
        Duration::from_secs(self.ready_interval_secs)
    }
}
