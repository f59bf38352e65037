// =====
// TESTS: 10
// =====
//
// Sidebar / conversation lifecycle integration tests.

use bible_qa_rust::api::events::ClientEvent;
use bible_qa_rust::api::types::{Conversation, HealthResponse, StoredMessage};
use bible_qa_rust::app::transcript::Phase;
use crossterm::event::KeyCode;
use pretty_assertions::assert_eq;

use crate::helpers::{begin_turn, press, send_client_event, test_app, type_str};

fn conversation(id: &str, first: &str) -> Conversation {
    Conversation {
        id: id.to_owned(),
        created_at: "2025-08-01T10:00:00Z".to_owned(),
        updated_at: "2025-08-07T09:00:00Z".to_owned(),
        metadata: None,
        first_message: Some(first.to_owned()),
    }
}

fn stored(role: &str, content: &str) -> StoredMessage {
    StoredMessage {
        id: None,
        role: role.to_owned(),
        content: content.to_owned(),
        created_at: String::new(),
    }
}

#[tokio::test]
async fn listed_conversations_populate_the_sidebar() {
    let mut app = test_app();
    app.conversations.loading = true;
    send_client_event(
        &mut app,
        ClientEvent::ConversationsListed(vec![
            conversation("c-1", "첫 질문"),
            conversation("c-2", "둘째 질문"),
        ]),
    );
    assert!(!app.conversations.loading);
    assert_eq!(app.conversations.items.len(), 2);
    assert_eq!(app.conversations.items[0].display_title(), "첫 질문");
}

#[tokio::test]
async fn sidebar_selection_follows_the_open_conversation() {
    let mut app = test_app();
    app.transcript.conversation_id = Some("c-2".to_owned());
    send_client_event(
        &mut app,
        ClientEvent::ConversationsListed(vec![
            conversation("c-1", "a"),
            conversation("c-2", "b"),
            conversation("c-3", "c"),
        ]),
    );
    assert_eq!(app.conversations.selected, 1);
}

#[tokio::test]
async fn loaded_history_replaces_the_transcript() {
    let mut app = test_app();
    app.conversations.pending_load = Some("c-1".to_owned());
    send_client_event(
        &mut app,
        ClientEvent::MessagesLoaded {
            conversation_id: "c-1".to_owned(),
            messages: vec![stored("user", "질문입니다"), stored("assistant", "답변입니다")],
        },
    );
    assert_eq!(app.transcript.conversation_id.as_deref(), Some("c-1"));
    assert_eq!(app.transcript.messages.len(), 2);
    assert_eq!(app.transcript.messages[1].text, "답변입니다");
}

#[tokio::test]
async fn stale_history_loads_are_dropped() {
    let mut app = test_app();
    // The user has since selected a different conversation.
    app.conversations.pending_load = Some("c-2".to_owned());
    send_client_event(
        &mut app,
        ClientEvent::MessagesLoaded {
            conversation_id: "c-1".to_owned(),
            messages: vec![stored("user", "옛 질문")],
        },
    );
    assert!(app.transcript.messages.is_empty());
    assert_eq!(app.transcript.conversation_id, None);
}

/// The two transcript writers may not interleave: a reload that races a
/// send is dropped instead of clearing the streaming placeholder.
#[tokio::test]
async fn history_load_is_suppressed_while_a_turn_is_in_flight() {
    let mut app = test_app();
    begin_turn(&mut app, "지금 질문");
    app.conversations.pending_load = Some("c-1".to_owned());
    send_client_event(
        &mut app,
        ClientEvent::MessagesLoaded {
            conversation_id: "c-1".to_owned(),
            messages: vec![stored("user", "예전 질문")],
        },
    );
    assert_eq!(app.transcript.messages.len(), 2, "placeholder survives");
    assert_eq!(app.transcript.phase, Phase::Loading);
}

#[tokio::test]
async fn delete_of_the_open_conversation_resets_the_transcript() {
    let mut app = test_app();
    app.transcript.conversation_id = Some("c-1".to_owned());
    send_client_event(
        &mut app,
        ClientEvent::ConversationsListed(vec![conversation("c-1", "a"), conversation("c-2", "b")]),
    );
    send_client_event(
        &mut app,
        ClientEvent::DeleteFinished { conversation_id: "c-1".to_owned(), result: Ok(()) },
    );
    assert_eq!(app.conversations.items.len(), 1);
    assert_eq!(app.transcript.conversation_id, None);
    assert!(app.transcript.messages.is_empty());
}

#[tokio::test]
async fn failed_delete_raises_a_blocking_notice() {
    let mut app = test_app();
    send_client_event(
        &mut app,
        ClientEvent::DeleteFinished {
            conversation_id: "c-1".to_owned(),
            result: Err("HTTP 500".to_owned()),
        },
    );
    assert_eq!(app.notice.as_deref(), Some("대화 삭제에 실패했습니다."));

    // The notice captures the next keypress instead of the editor.
    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.notice, None);
    assert!(app.input.is_empty(), "keypress dismissed the notice, nothing else");
}

#[tokio::test]
async fn successful_rename_updates_the_local_title() {
    let mut app = test_app();
    send_client_event(&mut app, ClientEvent::ConversationsListed(vec![conversation("c-1", "a")]));
    send_client_event(
        &mut app,
        ClientEvent::RenameFinished {
            conversation_id: "c-1".to_owned(),
            title: "새 제목".to_owned(),
            result: Ok(()),
        },
    );
    assert_eq!(app.conversations.items[0].display_title(), "새 제목");
}

/// Property 7: submitting while a stream is in flight is rejected at the
/// input surface; the editor keeps its text and no placeholder is added.
#[tokio::test]
async fn submit_is_rejected_while_streaming() {
    let mut app = test_app();
    begin_turn(&mut app, "첫 질문");
    assert_eq!(app.transcript.messages.len(), 2);

    type_str(&mut app, "두 번째 질문");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.transcript.messages.len(), 2, "no second turn while in flight");
    assert_eq!(app.input.text(), "두 번째 질문", "editor untouched for retry");
    assert_eq!(app.transcript.phase, Phase::Loading);
}

#[tokio::test]
async fn health_probe_outcome_lands_in_the_header_state() {
    let mut app = test_app();
    send_client_event(
        &mut app,
        ClientEvent::HealthChecked(Ok(HealthResponse {
            status: "healthy".to_owned(),
            message: "서비스가 정상적으로 동작 중입니다.".to_owned(),
        })),
    );
    assert!(matches!(app.health, Some(bible_qa_rust::app::HealthState::Healthy(_))));
}
