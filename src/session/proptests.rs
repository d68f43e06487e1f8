//! Property-based tests for transcript growth
//!
//! - A new session holds exactly the system turn, whatever the header
//! - Each successful interaction appends the user turn then the reply

use super::{Session, DEFAULT_MODEL};
use crate::llm::testing::MockLlmService;
use crate::llm::{Message, ServiceProvider};
use proptest::prelude::*;
use std::sync::Arc;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_new_session_holds_only_header(header in "\\PC{1,40}") {
        let mock = Arc::new(MockLlmService::new());
        let provider = Arc::new(ServiceProvider::preloaded(mock));
        let session = Session::with_provider(provider, DEFAULT_MODEL, header.clone());

        prop_assert_eq!(session.message_count(), 1);
        prop_assert_eq!(&session.messages()[0], &Message::system(header));
    }

    #[test]
    fn prop_each_interaction_appends_two_turns(
        header in "\\PC{1,40}",
        inputs in proptest::collection::vec("\\PC{0,40}", 0..6),
    ) {
        let mock = Arc::new(MockLlmService::new());
        for _ in &inputs {
            mock.queue_text("[]");
        }
        let provider = Arc::new(ServiceProvider::preloaded(mock.clone()));
        let mut session = Session::with_provider(provider, DEFAULT_MODEL, header.clone());
        let rt = runtime();

        for (i, input) in inputs.iter().enumerate() {
            let before = session.message_count();
            let result = rt.block_on(session.interact(input));
            prop_assert!(result.is_ok());
            prop_assert_eq!(session.message_count(), before + 2);
            prop_assert_eq!(session.message_count(), 1 + 2 * (i + 1));
            prop_assert_eq!(&session.messages()[before], &Message::user(input.as_str()));
            prop_assert_eq!(&session.messages()[before + 1], &Message::assistant("[]"));
        }

        prop_assert_eq!(&session.messages()[0], &Message::system(header));
        prop_assert_eq!(mock.recorded_requests().len(), inputs.len());
    }
}
