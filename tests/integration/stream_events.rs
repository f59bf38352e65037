// =====
// TESTS: 10
// =====
//
// Stream ingestion integration tests.
// Validates the SSE decode path and the transcript fold at App level.

use bible_qa_rust::api::error_handling::{GENERIC_RETRY_MESSAGE, OVERLOADED_MESSAGE};
use bible_qa_rust::api::events::ClientEvent;
use bible_qa_rust::api::sse::{SseFrameDecoder, StreamEvent};
use bible_qa_rust::app::transcript::{MessageStatus, Phase};
use pretty_assertions::assert_eq;

use crate::helpers::{begin_turn, send_client_event, send_stream_event, test_app};

// --- Full stream lifecycle ---

#[tokio::test]
async fn full_stream_lifecycle_token_by_token() {
    let mut app = test_app();
    let turn = begin_turn(&mut app, "창세기 1:1 의미");
    assert_eq!(app.transcript.phase, Phase::Loading);

    send_stream_event(&mut app, turn, StreamEvent::Token { content: "태초에 ".to_owned() });
    assert_eq!(app.transcript.phase, Phase::Streaming);
    assert_eq!(app.transcript.messages[1].status, MessageStatus::Streaming);

    send_stream_event(&mut app, turn, StreamEvent::Token { content: "하나님이".to_owned() });
    send_stream_event(&mut app, turn, StreamEvent::Done { sources: None });

    assert_eq!(app.transcript.messages[1].text, "태초에 하나님이");
    assert_eq!(app.transcript.messages[1].status, MessageStatus::Complete);
    assert_eq!(app.transcript.phase, Phase::Idle, "loading flag clear after done");
}

/// Property 3 end-to-end: bytes split anywhere inside a frame produce the
/// same transcript as the unsplit stream.
#[tokio::test]
async fn split_transport_chunks_fold_identically() {
    let frames =
        b"data: {\"type\": \"token\", \"content\": \"ab\"}\ndata: {\"type\": \"token\", \"content\": \"cd\"}\ndata: {\"type\": \"done\"}\n";

    for cut in 1..frames.len() - 1 {
        let mut app = test_app();
        let turn = begin_turn(&mut app, "q");

        let mut decoder = SseFrameDecoder::default();
        let mut events = decoder.feed(&frames[..cut]);
        events.extend(decoder.feed(&frames[cut..]));
        if let Some(event) = decoder.finish() {
            events.push(event);
        }
        for event in events {
            send_stream_event(&mut app, turn, event);
        }

        assert_eq!(app.transcript.messages[1].text, "abcd", "cut at {cut}");
        assert_eq!(app.transcript.messages[1].status, MessageStatus::Complete);
    }
}

// --- Terminal handling ---

#[tokio::test]
async fn error_event_marks_message_errored_and_clears_loading() {
    let mut app = test_app();
    let turn = begin_turn(&mut app, "q");
    send_stream_event(&mut app, turn, StreamEvent::Token { content: "부분".to_owned() });
    send_stream_event(
        &mut app,
        turn,
        StreamEvent::Error { content: Some("overloaded_error: 503".to_owned()) },
    );

    assert_eq!(app.transcript.messages[1].status, MessageStatus::Errored);
    assert_eq!(app.transcript.messages[1].text, OVERLOADED_MESSAGE);
    assert_eq!(app.transcript.phase, Phase::Idle);
}

#[tokio::test]
async fn stream_closing_without_terminal_still_clears_loading() {
    let mut app = test_app();
    let turn = begin_turn(&mut app, "q");
    send_stream_event(&mut app, turn, StreamEvent::Token { content: "절반".to_owned() });
    send_client_event(&mut app, ClientEvent::StreamClosed { turn });

    assert_eq!(app.transcript.phase, Phase::Idle);
    assert_eq!(app.transcript.messages[1].status, MessageStatus::Complete);
}

#[tokio::test]
async fn stream_closing_before_any_token_errors_the_placeholder() {
    let mut app = test_app();
    let turn = begin_turn(&mut app, "q");
    send_client_event(&mut app, ClientEvent::StreamClosed { turn });

    assert_eq!(app.transcript.messages[1].status, MessageStatus::Errored);
    assert_eq!(app.transcript.messages[1].text, GENERIC_RETRY_MESSAGE);
}

#[tokio::test]
async fn transport_failure_surfaces_synthetic_error_message() {
    let mut app = test_app();
    let turn = begin_turn(&mut app, "q");
    send_client_event(
        &mut app,
        ClientEvent::StreamFailed { turn, message: "connection refused".to_owned() },
    );

    assert_eq!(app.transcript.phase, Phase::Idle);
    assert_eq!(app.transcript.messages[1].status, MessageStatus::Errored);
    assert_eq!(app.transcript.messages[1].text, GENERIC_RETRY_MESSAGE);
}

#[tokio::test]
async fn events_after_done_are_not_applied() {
    let mut app = test_app();
    let turn = begin_turn(&mut app, "q");
    send_stream_event(&mut app, turn, StreamEvent::Token { content: "전부".to_owned() });
    send_stream_event(&mut app, turn, StreamEvent::Done { sources: None });
    send_stream_event(&mut app, turn, StreamEvent::Token { content: " 더".to_owned() });
    send_client_event(&mut app, ClientEvent::StreamClosed { turn });

    assert_eq!(app.transcript.messages[1].text, "전부");
    assert_eq!(app.transcript.messages[1].status, MessageStatus::Complete);
}

// --- Detach semantics ---

#[tokio::test]
async fn events_from_a_superseded_turn_are_dropped() {
    let mut app = test_app();
    let old_turn = begin_turn(&mut app, "첫 질문");

    // User abandons the stream by starting a new conversation.
    bible_qa_rust::app::conversations::start_new_conversation(&mut app);
    assert!(app.transcript.messages.is_empty());

    send_stream_event(&mut app, old_turn, StreamEvent::Token { content: "유령".to_owned() });
    send_client_event(&mut app, ClientEvent::StreamFailed {
        turn: old_turn,
        message: "late failure".to_owned(),
    });

    assert!(app.transcript.messages.is_empty(), "stale writes are no-ops");
    assert_eq!(app.transcript.phase, Phase::Idle);
}

// --- Conversation identity ---

#[tokio::test]
async fn start_event_adopts_conversation_identity_once() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let mut app = test_app();
            let turn = begin_turn(&mut app, "q");
            assert_eq!(app.transcript.conversation_id, None);

            send_stream_event(
                &mut app,
                turn,
                StreamEvent::Start { conversation_id: Some("c-42".to_owned()) },
            );
            assert_eq!(app.transcript.conversation_id.as_deref(), Some("c-42"));

            // A later conflicting start changes nothing.
            send_stream_event(
                &mut app,
                turn,
                StreamEvent::Start { conversation_id: Some("c-43".to_owned()) },
            );
            assert_eq!(app.transcript.conversation_id.as_deref(), Some("c-42"));
        })
        .await;
}

#[tokio::test]
async fn non_streaming_answer_folds_like_a_terminal_event() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let mut app = test_app();
            let turn = begin_turn(&mut app, "q");
            send_client_event(
                &mut app,
                ClientEvent::SendFinished {
                    turn,
                    result: Ok(bible_qa_rust::api::types::ChatResponse {
                        answer: "한 번에 온 답변".to_owned(),
                        conversation_id: Some("c-7".to_owned()),
                        sources: None,
                    }),
                },
            );
            assert_eq!(app.transcript.messages[1].text, "한 번에 온 답변");
            assert_eq!(app.transcript.messages[1].status, MessageStatus::Complete);
            assert_eq!(app.transcript.conversation_id.as_deref(), Some("c-7"));
            assert_eq!(app.transcript.phase, Phase::Idle);
        })
        .await;
}
