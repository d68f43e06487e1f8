//! Property-based tests for reply trimming
//!
//! - Trimming is idempotent
//! - Trimmed output never starts or ends with a commentary character
//! - A JSON array wrapped in arbitrary commentary survives intact

use super::{decode, is_commentary, trim};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Prose and fence markers drawn only from the commentary class
fn arb_commentary() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z \n:`.,]{0,40}",
        Just("Here is the result:\n```json\n".to_string()),
        Just("```\n".to_string()),
        Just(String::new()),
    ]
}

/// Light id as either a number or a name
fn arb_light_id() -> impl Strategy<Value = Value> {
    prop_oneof![
        (0u32..512).prop_map(|n| json!(n)),
        "[a-z_]{1,12}".prop_map(|s| json!(s)),
    ]
}

/// Color as a name, hex string, or RGB object
fn arb_color() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z]{3,10}".prop_map(|s| json!(s)),
        "#[0-9a-f]{6}".prop_map(|s| json!(s)),
        (0u8..=255, 0u8..=255, 0u8..=255).prop_map(|(r, g, b)| json!({"r": r, "g": g, "b": b})),
    ]
}

fn arb_commands() -> impl Strategy<Value = Value> {
    proptest::collection::vec(
        (arb_light_id(), arb_color())
            .prop_map(|(light_id, color)| json!({"light_id": light_id, "color": color})),
        0..6,
    )
    .prop_map(Value::Array)
}

proptest! {
    #[test]
    fn prop_trim_idempotent(s in "\\PC{0,80}") {
        let once = trim(&s);
        prop_assert_eq!(trim(once), once);
    }

    #[test]
    fn prop_trim_edges_are_not_commentary(s in "[a-zA-Z \n:`.,\\[\\]{}0-9\"]{0,80}") {
        let trimmed = trim(&s);
        if let (Some(first), Some(last)) = (trimmed.bytes().next(), trimmed.bytes().last()) {
            prop_assert!(!is_commentary(first));
            prop_assert!(!is_commentary(last));
        }
        prop_assert!(s.contains(trimmed));
    }

    #[test]
    fn prop_wrapped_payload_survives(
        prefix in arb_commentary(),
        commands in arb_commands(),
        suffix in arb_commentary(),
        pretty in any::<bool>(),
    ) {
        let payload = if pretty {
            serde_json::to_string_pretty(&commands).unwrap()
        } else {
            serde_json::to_string(&commands).unwrap()
        };
        let reply = format!("{prefix}{payload}{suffix}");

        prop_assert_eq!(trim(&reply), payload.as_str());
        let decoded: Value = decode(&reply).unwrap();
        prop_assert_eq!(decoded, commands);
    }
}
