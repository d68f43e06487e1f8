//! light_chat - conversational session wrapper for light control
//!
//! Keeps the running transcript of a chat with an LLM completion service
//! and turns each reply into structured light commands.

pub mod extract;
pub mod llm;
pub mod session;

pub use extract::MalformedReply;
pub use llm::{ConfigError, LlmConfig, LlmError, LlmErrorKind, LlmService, ServiceProvider};
pub use session::{LightCommand, Reply, Session, SessionError, DEFAULT_MODEL};
