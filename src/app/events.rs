// bible_qa_rust — A native Rust terminal interface for 성경QA
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use super::{App, Focus, HealthState};
use crate::api::events::ClientEvent;
use crate::app::conversations;
use crate::app::input_submit::submit_input;
use crate::app::mention;
use crate::app::transcript::{Applied, now_millis};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

const MOUSE_SCROLL_LINES: u16 = 3;

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if app.notice.is_some() {
                // Blocking notice: any key dismisses it, nothing else runs.
                app.notice = None;
            } else if app.conversations.confirm_delete.is_some() {
                handle_confirm_delete_key(app, key);
            } else if app.conversations.editing.is_some() {
                handle_rename_key(app, key);
            } else if app.mention.is_some() {
                handle_mention_key(app, key);
            } else if matches!(app.focus, Focus::Sidebar) {
                handle_sidebar_key(app, key);
            } else {
                handle_input_key(app, key);
            }
        }
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Paste(text) => {
            app.input.insert_str(&text);
            if app.mention.is_some() {
                mention::update_query(app);
            }
        }
        // Resize is handled automatically by ratatui
        _ => {}
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        // Enter (no shift): submit; Shift+Enter: newline
        (KeyCode::Enter, m) if !m.contains(KeyModifiers::SHIFT) => {
            submit_input(app);
        }
        (KeyCode::Enter, _) => app.input.insert_newline(),
        (KeyCode::Tab, _) => app.focus = Focus::Sidebar,
        // Ctrl+Up / Ctrl+Down: scroll the transcript
        (KeyCode::Up, m) if m.contains(KeyModifiers::CONTROL) => {
            app.scroll_offset = app.scroll_offset.saturating_sub(1);
            app.auto_scroll = false;
        }
        (KeyCode::Down, m) if m.contains(KeyModifiers::CONTROL) => {
            // re-engagement at the bottom is handled by chat rendering
            app.scroll_offset = app.scroll_offset.saturating_add(1);
        }
        (KeyCode::Left, _) => app.input.move_left(),
        (KeyCode::Right, _) => app.input.move_right(),
        (KeyCode::Up, _) => app.input.move_up(),
        (KeyCode::Down, _) => app.input.move_down(),
        (KeyCode::Home, _) => app.input.move_home(),
        (KeyCode::End, _) => app.input.move_end(),
        // Ctrl+B: scripture picker (the trigger-button counterpart)
        (KeyCode::Char('b'), m) if m.contains(KeyModifiers::CONTROL) => {
            mention::toggle_button(app);
        }
        (KeyCode::Char('n'), m) if m.contains(KeyModifiers::CONTROL) => {
            conversations::start_new_conversation(app);
        }
        (KeyCode::Char('y'), m) if m.contains(KeyModifiers::CONTROL) => {
            copy_latest_answer(app);
        }
        (KeyCode::Char('o'), m) if m.contains(KeyModifiers::CONTROL) => {
            app.show_sources = !app.show_sources;
        }
        (KeyCode::Char('r'), m) if m.contains(KeyModifiers::CONTROL) => {
            conversations::start_list_refresh(app);
        }
        (KeyCode::Backspace, _) => app.input.delete_char_before(),
        (KeyCode::Delete, _) => app.input.delete_char_after(),
        (KeyCode::Char(c), _) => {
            app.input.insert_char(c);
            if c == '@' {
                mention::activate_typed(app);
            }
        }
        _ => {}
    }
}

/// Keystrokes while the mention dropdown is open.
fn handle_mention_key(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Up, _) => mention::move_up(app),
        (KeyCode::Down, _) => mention::move_down(app),
        (KeyCode::Enter | KeyCode::Tab, _) => mention::confirm_selection(app),
        (KeyCode::Esc, _) => mention::deactivate(app),
        // Ctrl+B toggles the picker closed again
        (KeyCode::Char('b'), m) if m.contains(KeyModifiers::CONTROL) => {
            mention::toggle_button(app);
        }
        (KeyCode::Backspace, _) => {
            app.input.delete_char_before();
            mention::update_query(app);
        }
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
            app.input.insert_char(c);
            // A typed trigger dies on whitespace; the re-scan handles it.
            mention::update_query(app);
        }
        // Any other key: close the dropdown and handle normally
        _ => {
            mention::deactivate(app);
            handle_input_key(app, key);
        }
    }
}

fn handle_sidebar_key(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        (KeyCode::Char('r'), m) if m.contains(KeyModifiers::CONTROL) => {
            conversations::start_list_refresh(app);
        }
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.conversations.move_up(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.conversations.move_down(),
        (KeyCode::Enter, _) => {
            conversations::open_selected(app);
            app.focus = Focus::Input;
        }
        (KeyCode::Char('n'), _) => {
            conversations::start_new_conversation(app);
            app.focus = Focus::Input;
        }
        (KeyCode::Char('r'), _) => conversations::start_rename(app),
        (KeyCode::Char('d'), _) => conversations::request_delete(app),
        (KeyCode::Tab | KeyCode::Esc, _) => app.focus = Focus::Input,
        _ => {}
    }
}

/// Inline rename editor: plain single-line editing over `RenameState`.
fn handle_rename_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.conversations.editing = None,
        KeyCode::Enter => conversations::submit_rename(app),
        _ => {
            let Some(editing) = app.conversations.editing.as_mut() else { return };
            match key.code {
                KeyCode::Backspace => {
                    if editing.cursor > 0 {
                        editing.cursor -= 1;
                        remove_char_at(&mut editing.buffer, editing.cursor);
                    }
                }
                KeyCode::Left => editing.cursor = editing.cursor.saturating_sub(1),
                KeyCode::Right => {
                    editing.cursor = (editing.cursor + 1).min(editing.buffer.chars().count());
                }
                KeyCode::Home => editing.cursor = 0,
                KeyCode::End => editing.cursor = editing.buffer.chars().count(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    insert_char_at(&mut editing.buffer, editing.cursor, c);
                    editing.cursor += 1;
                }
                _ => {}
            }
        }
    }
}

fn handle_confirm_delete_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y' | 'Y') => conversations::confirm_delete(app),
        _ => app.conversations.confirm_delete = None,
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // Click inside the dropdown selects; any other click dismisses
            // the open mention context (outside-pointer rule).
            if let Some(area) = app.cached_dropdown_area
                && rect_contains(area, mouse.column, mouse.row)
            {
                if mouse.row > area.y && mouse.row + 1 < area.bottom() {
                    let offset = app.mention.as_ref().map_or(0, |m| m.scroll_offset);
                    let index = usize::from(mouse.row - area.y - 1) + offset;
                    mention::click_candidate(app, index);
                }
                return;
            }
            if app.mention.is_some() {
                mention::deactivate(app);
                return;
            }
            if rect_contains(app.cached_sidebar_area, mouse.column, mouse.row) {
                app.focus = Focus::Sidebar;
            } else if rect_contains(app.cached_input_area, mouse.column, mouse.row) {
                app.focus = Focus::Input;
            }
        }
        MouseEventKind::ScrollUp => {
            app.scroll_offset = app.scroll_offset.saturating_sub(MOUSE_SCROLL_LINES);
            app.auto_scroll = false;
        }
        MouseEventKind::ScrollDown => {
            app.scroll_offset = app.scroll_offset.saturating_add(MOUSE_SCROLL_LINES);
        }
        _ => {}
    }
}

fn rect_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

fn copy_latest_answer(app: &mut App) {
    let Some(message) = app.transcript.latest_answer() else {
        return;
    };
    let text = message.text.clone();
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => app.notice = Some("답변이 클립보드에 복사되었습니다.".to_owned()),
        Err(err) => {
            tracing::error!("clipboard copy failed: {err}");
            app.notice = Some("복사에 실패했습니다.".to_owned());
        }
    }
}

pub fn handle_client_event(app: &mut App, event: ClientEvent) {
    match event {
        ClientEvent::Stream { turn, event } => {
            if turn != app.turn {
                tracing::debug!("dropping stream event from superseded turn {turn}");
                return;
            }
            let applied = app.transcript.apply(event);
            finish_applied(app, applied);
        }
        ClientEvent::StreamClosed { turn } => {
            if turn == app.turn {
                let applied = app.transcript.finish_without_terminal();
                finish_applied(app, applied);
            }
        }
        ClientEvent::StreamFailed { turn, message } => {
            if turn == app.turn {
                let applied = app.transcript.fail_transport(&message, now_millis());
                finish_applied(app, applied);
            }
        }
        ClientEvent::SendFinished { turn, result } => {
            if turn != app.turn {
                return;
            }
            let applied = match result {
                Ok(response) => app.transcript.apply_answer(response),
                Err(message) => app.transcript.fail_transport(&message, now_millis()),
            };
            finish_applied(app, applied);
        }
        ClientEvent::ConversationsListed(items) => {
            app.conversations.loading = false;
            app.conversations.items = items;
            // Keep the highlight on the open conversation when possible.
            if let Some(current) = app.transcript.conversation_id.as_deref()
                && let Some(idx) = app.conversations.items.iter().position(|c| c.id == current)
            {
                app.conversations.selected = idx;
            } else if !app.conversations.items.is_empty() {
                app.conversations.selected =
                    app.conversations.selected.min(app.conversations.items.len() - 1);
            } else {
                app.conversations.selected = 0;
            }
        }
        ClientEvent::MessagesLoaded { conversation_id, messages } => {
            conversations::apply_loaded_messages(app, conversation_id, messages);
        }
        ClientEvent::RenameFinished { conversation_id, title, result } => match result {
            Ok(()) => {
                if let Some(item) =
                    app.conversations.items.iter_mut().find(|c| c.id == conversation_id)
                {
                    item.set_title(&title);
                }
            }
            Err(err) => {
                tracing::error!("rename failed for {conversation_id}: {err}");
                app.notice = Some("대화 제목 수정에 실패했습니다.".to_owned());
            }
        },
        ClientEvent::DeleteFinished { conversation_id, result } => match result {
            Ok(()) => conversations::apply_delete(app, &conversation_id),
            Err(err) => {
                tracing::error!("delete failed for {conversation_id}: {err}");
                app.notice = Some("대화 삭제에 실패했습니다.".to_owned());
            }
        },
        ClientEvent::HealthChecked(result) => {
            app.health = Some(match result {
                Ok(health) => HealthState::Healthy(health.message),
                Err(err) => HealthState::Unreachable(err),
            });
        }
    }
}

/// Route the reducer's explicit outcome back into app-level state.
fn finish_applied(app: &mut App, applied: Applied) {
    if let Some(id) = applied.adopted_conversation_id {
        conversations::adopt_conversation(app, &id);
    }
    if applied.finished {
        app.auto_scroll = true;
    }
}

fn insert_char_at(buffer: &mut String, char_idx: usize, c: char) {
    let byte_idx =
        buffer.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(buffer.len());
    buffer.insert(byte_idx, c);
}

fn remove_char_at(buffer: &mut String, char_idx: usize) {
    if let Some((byte_idx, _)) = buffer.char_indices().nth(char_idx) {
        buffer.remove(byte_idx);
    }
}
