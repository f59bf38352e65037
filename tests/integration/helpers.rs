use bible_qa_rust::api::events::ClientEvent;
use bible_qa_rust::api::sse::StreamEvent;
use bible_qa_rust::app::App;
use bible_qa_rust::app::transcript::now_millis;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Build a minimal `App` for integration testing.
/// No real backend connection, no TUI -- just state.
pub fn test_app() -> App {
    App::test_default()
}

/// Send a background-task event into the app's event handling pipeline.
pub fn send_client_event(app: &mut App, event: ClientEvent) {
    bible_qa_rust::app::handle_client_event(app, event);
}

/// Start a turn the way a submit would, and return the turn id stream
/// events must carry.
pub fn begin_turn(app: &mut App, text: &str) -> u64 {
    assert!(app.transcript.begin_turn(text, now_millis()));
    app.turn += 1;
    app.turn
}

/// Deliver one decoded stream event for the given turn.
pub fn send_stream_event(app: &mut App, turn: u64, event: StreamEvent) {
    send_client_event(app, ClientEvent::Stream { turn, event });
}

/// Press a plain key.
pub fn press(app: &mut App, code: KeyCode) {
    bible_qa_rust::app::handle_terminal_event(
        app,
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE)),
    );
}

/// Press a key with modifiers.
pub fn press_with(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    bible_qa_rust::app::handle_terminal_event(app, Event::Key(KeyEvent::new(code, modifiers)));
}

/// Type a string one keystroke at a time, driving the mention machine the
/// same way live input does.
pub fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}
