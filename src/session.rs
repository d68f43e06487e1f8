//! Conversation session
//!
//! A `Session` owns the transcript for one conversation with the completion
//! service. Every call to [`Session::interact`] appends the user turn, sends
//! the whole transcript, appends the reply, and decodes the reply as JSON.
//!
//! The transcript only grows. A failed call leaves whatever was appended
//! before the failure: the user turn always, the assistant turn whenever a
//! reply came back (even an undecodable one).

#[cfg(test)]
mod proptests;

use crate::extract::{self, MalformedReply};
use crate::llm::{ConfigError, LlmError, LlmRequest, Message, ServiceProvider};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Errors from a single interaction
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("completion service is not configured: {0}")]
    Configuration(#[from] ConfigError),
    /// Passed through from the service untouched
    #[error(transparent)]
    Transport(#[from] LlmError),
    #[error(transparent)]
    MalformedReply(#[from] MalformedReply),
}

/// A decoded reply. Any JSON the reply trims down to is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reply(pub Value);

impl Reply {
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// The mapping objects in the reply: every object in a top-level array,
    /// or the top-level object itself. Anything else yields nothing.
    pub fn commands(&self) -> Vec<LightCommand<'_>> {
        match &self.0 {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_object)
                .map(|fields| LightCommand { fields })
                .collect(),
            Value::Object(fields) => vec![LightCommand { fields }],
            _ => Vec::new(),
        }
    }
}

/// One light command inside a [`Reply`].
///
/// The shape is up to whoever wrote the prompt; `light_id` and `color` are
/// the conventional keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightCommand<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> LightCommand<'a> {
    pub fn light_id(&self) -> Option<&'a Value> {
        self.fields.get("light_id")
    }

    pub fn color(&self) -> Option<&'a Value> {
        self.fields.get("color")
    }
}

/// A conversation with message history
pub struct Session {
    /// Transcript; index 0 is always the system header
    messages: Vec<Message>,
    model: String,
    provider: Arc<ServiceProvider>,
}

impl Session {
    /// New session on the process-wide provider. No network activity.
    pub fn new(model: impl Into<String>, header: impl Into<String>) -> Self {
        Self::with_provider(ServiceProvider::shared(), model, header)
    }

    pub fn with_provider(
        provider: Arc<ServiceProvider>,
        model: impl Into<String>,
        header: impl Into<String>,
    ) -> Self {
        Self {
            messages: vec![Message::system(header)],
            model: model.into(),
            provider,
        }
    }

    /// Submit `message` and decode the reply as untyped JSON.
    pub async fn interact(&mut self, message: &str) -> Result<Reply, SessionError> {
        self.interact_as(message).await
    }

    /// Submit `message` and decode the reply into a caller-chosen shape.
    ///
    /// A reply that is valid JSON but does not fit `T` is reported as
    /// [`SessionError::MalformedReply`], same as one that is not JSON at all.
    pub async fn interact_as<T: DeserializeOwned>(
        &mut self,
        message: &str,
    ) -> Result<T, SessionError> {
        self.messages.push(Message::user(message));

        let service = self.provider.get().await?;

        let request = LlmRequest {
            model: self.model.clone(),
            messages: self.messages.clone(),
        };
        let response = service.complete(&request).await?;

        self.messages.push(Message::assistant(response.text));
        let reply = &self.messages[self.messages.len() - 1].content;

        extract::decode(reply).map_err(|e| {
            tracing::warn!(
                model = %self.model,
                reply = %e.raw,
                error = %e.source,
                "Reply could not be decoded"
            );
            SessionError::MalformedReply(e)
        })
    }

    /// Get the full transcript, header first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The system instruction the session was created with.
    pub fn header(&self) -> &str {
        &self.messages[0].content
    }

    /// Number of messages in the transcript, header included.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, "")
    }
}
