//! light-chat - line-oriented front end for a light control session
//!
//! Reads one user message per line from stdin and prints the decoded
//! commands for each reply as a JSON line on stdout.

use light_chat::{Session, SessionError, DEFAULT_MODEL};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "light_chat=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let model = std::env::var("LIGHT_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let header = match std::env::var("LIGHT_CHAT_HEADER_FILE") {
        Ok(path) => std::fs::read_to_string(&path)?,
        Err(_) => std::env::var("LIGHT_CHAT_HEADER").unwrap_or_default(),
    };

    tracing::info!(model = %model, header_len = header.len(), "Starting session");
    let mut session = Session::new(model, header);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match session.interact(&line).await {
            Ok(reply) => {
                for command in reply.commands() {
                    tracing::debug!(
                        light_id = ?command.light_id(),
                        color = ?command.color(),
                        "Light command"
                    );
                }
                println!("{}", serde_json::to_string(&reply)?);
            }
            // Bad replies are already logged; keep the conversation going.
            Err(SessionError::MalformedReply(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(messages = session.message_count(), "Session finished");
    Ok(())
}
