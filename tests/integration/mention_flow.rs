// =====
// TESTS: 10
// =====
//
// Mention state machine integration tests, driven through real key events.

use bible_qa_rust::app::mention::TriggerSource;
use crossterm::event::{
    Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use pretty_assertions::assert_eq;

use crate::helpers::{press, press_with, test_app, type_str};

#[tokio::test]
async fn typing_at_opens_the_mention_context() {
    let mut app = test_app();
    type_str(&mut app, "See @");
    let mention = app.mention.as_ref().expect("mention open after @");
    assert_eq!(mention.source, TriggerSource::Typed);
    assert_eq!(mention.query, "");
    assert_eq!(mention.candidates.len(), 66);
}

#[tokio::test]
async fn query_follows_the_keystrokes() {
    let mut app = test_app();
    type_str(&mut app, "See @요한");
    let mention = app.mention.as_ref().expect("mention open");
    assert_eq!(mention.query, "요한");
    let names: Vec<&str> = mention.candidates.iter().map(|b| b.name).collect();
    assert_eq!(names, vec!["요한복음", "요한일서", "요한이서", "요한삼서", "요한계시록"]);
}

/// Property 4: whitespace after the query breaks the trigger.
#[tokio::test]
async fn space_after_the_query_closes_the_context() {
    let mut app = test_app();
    type_str(&mut app, "See @Gen");
    assert!(app.mention.is_some());
    type_str(&mut app, " is");
    assert!(app.mention.is_none(), "space broke the trigger");
    assert_eq!(app.input.text(), "See @Gen is");
}

/// Property 5: commit splices the book plus one trailing space over the
/// `@query` span, caret right after the space.
#[tokio::test]
async fn commit_splices_over_the_typed_trigger() {
    let mut app = test_app();
    type_str(&mut app, "See @창세 please");
    // Walk the caret back to just after "창세" (before " please").
    for _ in 0.." please".chars().count() {
        press(&mut app, KeyCode::Left);
    }
    // Caret movement alone does not re-open the context; re-trigger the
    // scan the way the next keystroke would.
    bible_qa_rust::app::mention::activate_typed(&mut app);
    let mention = app.mention.as_ref().expect("mention open at @창세");
    assert_eq!(mention.query, "창세");
    assert_eq!(mention.candidates.len(), 1);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.input.text(), "See 창세기 please");
    assert!(app.mention.is_none(), "commit closes the context");
    // caret immediately after the inserted space
    assert_eq!(app.input.cursor_col, "See 창세기 ".chars().count());
}

/// Property 6: arrow navigation clamps, it never wraps.
#[tokio::test]
async fn highlight_clamps_at_both_ends() {
    let mut app = test_app();
    type_str(&mut app, "@요한");
    let count = app.mention.as_ref().map(|m| m.candidates.len()).unwrap_or(0);
    assert_eq!(count, 5);

    press(&mut app, KeyCode::Up);
    assert_eq!(app.mention.as_ref().map(|m| m.selected), Some(0), "no wrap at top");

    for _ in 0..10 {
        press(&mut app, KeyCode::Down);
    }
    assert_eq!(app.mention.as_ref().map(|m| m.selected), Some(4), "clamped at bottom");
}

#[tokio::test]
async fn query_change_resets_the_highlight() {
    let mut app = test_app();
    type_str(&mut app, "@요한");
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.mention.as_ref().map(|m| m.selected), Some(2));

    type_str(&mut app, "복");
    let mention = app.mention.as_ref().expect("still open");
    assert_eq!(mention.query, "요한복");
    assert_eq!(mention.selected, 0, "highlight reset on query change");
}

#[tokio::test]
async fn escape_dismisses_without_touching_the_buffer() {
    let mut app = test_app();
    type_str(&mut app, "ask @욥");
    assert!(app.mention.is_some());
    press(&mut app, KeyCode::Esc);
    assert!(app.mention.is_none());
    assert_eq!(app.input.text(), "ask @욥");
}

#[tokio::test]
async fn picker_shortcut_toggles_and_commits_at_the_caret() {
    let mut app = test_app();
    type_str(&mut app, "read  now");
    for _ in 0..4 {
        press(&mut app, KeyCode::Left);
    }

    press_with(&mut app, KeyCode::Char('b'), KeyModifiers::CONTROL);
    let mention = app.mention.as_ref().expect("picker open");
    assert_eq!(mention.source, TriggerSource::Button);
    assert_eq!(mention.query, "");

    // Toggle closes, toggle reopens.
    press_with(&mut app, KeyCode::Char('b'), KeyModifiers::CONTROL);
    assert!(app.mention.is_none());
    press_with(&mut app, KeyCode::Char('b'), KeyModifiers::CONTROL);

    press(&mut app, KeyCode::Enter);
    // The space already under the caret is reused, not doubled.
    assert_eq!(app.input.text(), "read 창세기 now");
    assert_eq!(app.input.cursor_col, "read 창세기 ".chars().count());
}

#[tokio::test]
async fn outside_click_dismisses_the_popup() {
    let mut app = test_app();
    type_str(&mut app, "@시");
    assert!(app.mention.is_some());

    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 1,
        row: 1,
        modifiers: KeyModifiers::NONE,
    };
    bible_qa_rust::app::handle_terminal_event(&mut app, Event::Mouse(click));
    assert!(app.mention.is_none());
}

#[tokio::test]
async fn enter_with_no_candidates_is_a_no_op() {
    let mut app = test_app();
    type_str(&mut app, "@xyz");
    let mention = app.mention.as_ref().expect("open with empty candidates");
    assert!(mention.candidates.is_empty());

    press(&mut app, KeyCode::Enter);
    assert!(app.mention.is_some(), "nothing to commit, popup stays");
    assert_eq!(app.input.text(), "@xyz");
}
