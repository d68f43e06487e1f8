//! Completion service configuration

use std::time::Duration;

/// Environment variable holding the completion service credential
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

const TIMEOUT_VAR: &str = "OPENAI_REQUEST_TIMEOUT_SECS";

/// Configuration for the completion service
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    /// Override for OpenAI-compatible endpoints (e.g., a local proxy)
    pub base_url: Option<String>,
    /// Transport-level timeout; unset means wait indefinitely
    pub request_timeout: Option<Duration>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: std::env::var(API_KEY_VAR).ok(),
            base_url: std::env::var("OPENAI_BASE_URL").ok(),
            request_timeout: parse_timeout(std::env::var(TIMEOUT_VAR).ok().as_deref()),
        }
    }

    /// The credential, treating an empty value as missing
    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
    }
}

/// Whole seconds; anything else is logged and ignored
fn parse_timeout(raw: Option<&str>) -> Option<Duration> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(e) => {
            tracing::warn!(
                var = TIMEOUT_VAR,
                value = raw,
                error = %e,
                "Ignoring invalid request timeout"
            );
            None
        }
    }
}
