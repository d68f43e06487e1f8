//! Recover a JSON payload from a free-form model reply
//!
//! Replies tend to arrive as prose around a fenced block:
//!
//! ````text
//! Here is the result:
//! ```json
//! [{"light_id": 1, "color": "red"}]
//! ```
//! ````
//!
//! [`trim`] strips the commentary from both ends with a fixed character
//! class and [`decode`] parses what is left. This is a heuristic, not a
//! parser: a payload whose own first or last character falls in the class
//! (a bare `true`, say) is over-trimmed.

#[cfg(test)]
mod proptests;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// The reply did not decode after trimming
#[derive(Debug, Error)]
#[error("reply is not valid JSON after trimming: {source}")]
pub struct MalformedReply {
    /// The untrimmed reply, in full
    pub raw: String,
    #[source]
    pub source: serde_json::Error,
}

/// Characters treated as commentary around the payload
pub fn is_commentary(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || matches!(byte, b' ' | b'\n' | b':' | b'`' | b'.' | b',')
}

/// Strip the longest leading and trailing runs of commentary characters.
pub fn trim(s: &str) -> &str {
    let bytes = s.as_bytes();

    let mut start = 0;
    while start < bytes.len() && is_commentary(bytes[start]) {
        start += 1;
    }

    let mut end = bytes.len();
    while end > start && is_commentary(bytes[end - 1]) {
        end -= 1;
    }

    // Commentary is all ASCII, so both cuts land on char boundaries.
    s.get(start..end).unwrap_or_default()
}

/// Trim `raw` and decode the remainder as JSON.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, MalformedReply> {
    serde_json::from_str(trim(raw)).map_err(|source| MalformedReply {
        raw: raw.to_string(),
        source,
    })
}
