//! Lazily-initialized completion service handle
//!
//! Sessions hold an `Arc<ServiceProvider>` instead of reaching for a global
//! client. The handle is built on first use, at most once, so a missing
//! credential surfaces on the first request rather than at startup.

use super::config::{LlmConfig, API_KEY_VAR};
use super::error::ConfigError;
use super::{LlmService, LoggingService, OpenAIService};
use std::sync::{Arc, OnceLock};
use tokio::sync::OnceCell;

type ServiceFactory =
    Box<dyn Fn() -> Result<Arc<dyn LlmService>, ConfigError> + Send + Sync>;

/// Builds the completion service once and hands out shared references to it
pub struct ServiceProvider {
    cell: OnceCell<Arc<dyn LlmService>>,
    factory: ServiceFactory,
}

impl ServiceProvider {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn LlmService>, ConfigError> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            factory: Box::new(factory),
        }
    }

    /// Provider backed by the `OpenAI` chat completions API
    pub fn from_config(config: LlmConfig) -> Self {
        Self::from_source(move || config.clone())
    }

    /// Like [`from_config`](Self::from_config), but `source` is consulted on
    /// every initialization attempt, so a fixed-up configuration is picked up
    /// after a failure.
    pub fn from_source<F>(source: F) -> Self
    where
        F: Fn() -> LlmConfig + Send + Sync + 'static,
    {
        Self::new(move || build_openai(&source()))
    }

    /// Provider that is already initialized with `service`
    pub fn preloaded(service: Arc<dyn LlmService>) -> Self {
        Self {
            cell: OnceCell::new_with(Some(service)),
            factory: Box::new(|| Err(ConfigError::Client("provider was preloaded".to_string()))),
        }
    }

    /// Process-wide provider configured from the environment.
    ///
    /// The environment is read when a session first needs the service, and
    /// read again on the next attempt if the credential was missing.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<ServiceProvider>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(Self::from_source(LlmConfig::from_env)))
            .clone()
    }

    /// Get the service, building it on first use.
    ///
    /// A failed build leaves the provider empty; the next call tries again.
    pub async fn get(&self) -> Result<Arc<dyn LlmService>, ConfigError> {
        self.cell
            .get_or_try_init(|| async { (self.factory)() })
            .await
            .cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

fn build_openai(config: &LlmConfig) -> Result<Arc<dyn LlmService>, ConfigError> {
    let api_key = config
        .api_key()
        .ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;
    let service = OpenAIService::new(api_key, config.base_url.as_deref(), config.request_timeout)?;
    tracing::debug!(endpoint = %service.endpoint(), "Completion service initialized");
    Ok(Arc::new(LoggingService::new(Arc::new(service))))
}
