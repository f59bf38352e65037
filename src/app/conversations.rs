// bible_qa_rust - A native Rust terminal interface for 성경QA
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

use super::App;
use crate::api::events::ClientEvent;
use crate::api::types::Conversation;
use crate::app::transcript::now_millis;

/// Sidebar state for the persisted conversation list.
#[derive(Debug, Default)]
pub struct ConversationListState {
    pub items: Vec<Conversation>,
    pub selected: usize,
    pub loading: bool,
    /// In-flight history fetch; a result for any other id is stale.
    pub pending_load: Option<String>,
    pub editing: Option<RenameState>,
    /// Conversation id awaiting a y/n delete confirmation.
    pub confirm_delete: Option<String>,
}

/// Inline title editor for one sidebar row.
#[derive(Debug)]
pub struct RenameState {
    pub conversation_id: String,
    pub buffer: String,
    pub cursor: usize,
}

impl ConversationListState {
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1).min(self.items.len() - 1);
        }
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&Conversation> {
        self.items.get(self.selected)
    }
}

/// Refresh the sidebar. Idempotent re-fetch; failures are log-only and
/// leave whatever is currently shown in place.
pub fn start_list_refresh(app: &mut App) {
    app.conversations.loading = app.conversations.items.is_empty();
    let client = app.client.clone();
    let tx = app.event_tx.clone();
    tokio::task::spawn_local(async move {
        match client.list_conversations().await {
            Ok(items) => {
                let _ = tx.send(ClientEvent::ConversationsListed(items));
            }
            Err(err) => tracing::error!("conversation list refresh failed: {err:#}"),
        }
    });
}

/// Open the highlighted conversation and load its history. Skipped when it
/// is already the current one, and suppressed entirely while a turn is in
/// flight so a reload can never clear an in-progress placeholder.
pub fn open_selected(app: &mut App) {
    let Some(conversation) = app.conversations.selected_item() else {
        return;
    };
    let id = conversation.id.clone();
    if app.transcript.conversation_id.as_deref() == Some(id.as_str()) {
        return;
    }
    if !app.transcript.can_submit() {
        tracing::debug!("conversation switch suppressed while a turn is in flight");
        return;
    }

    app.conversations.pending_load = Some(id.clone());
    let client = app.client.clone();
    let tx = app.event_tx.clone();
    tokio::task::spawn_local(async move {
        match client.conversation_messages(&id).await {
            Ok(messages) => {
                let _ = tx.send(ClientEvent::MessagesLoaded { conversation_id: id, messages });
            }
            Err(err) => tracing::error!("message load failed for {id}: {err:#}"),
        }
    });
}

/// Begin an empty, unidentified conversation. Allowed at any time; events
/// from a superseded stream are dropped by the turn guard.
pub fn start_new_conversation(app: &mut App) {
    app.transcript.clear();
    app.conversations.pending_load = None;
    app.turn += 1;
    app.auto_scroll = true;
}

/// Point the sidebar selection at the conversation the backend just named
/// in a `start` event, then refresh so the new thread appears in the list.
pub fn adopt_conversation(app: &mut App, id: &str) {
    if let Some(idx) = app.conversations.items.iter().position(|c| c.id == id) {
        app.conversations.selected = idx;
    }
    start_list_refresh(app);
}

/// Open the inline title editor for the highlighted row.
pub fn start_rename(app: &mut App) {
    let Some(conversation) = app.conversations.selected_item() else {
        return;
    };
    let buffer = conversation.editable_title();
    let cursor = buffer.chars().count();
    app.conversations.editing = Some(RenameState {
        conversation_id: conversation.id.clone(),
        buffer,
        cursor,
    });
}

/// Submit the rename editor. An empty title is refused with a notice, the
/// same validation the service applies.
pub fn submit_rename(app: &mut App) {
    let Some(editing) = app.conversations.editing.take() else {
        return;
    };
    let title = editing.buffer.trim().to_owned();
    if title.is_empty() {
        app.notice = Some("제목을 입력해주세요.".to_owned());
        return;
    }

    let client = app.client.clone();
    let tx = app.event_tx.clone();
    let id = editing.conversation_id;
    tokio::task::spawn_local(async move {
        let result = client.rename_conversation(&id, &title).await.map_err(|e| format!("{e:#}"));
        let _ = tx.send(ClientEvent::RenameFinished { conversation_id: id, title, result });
    });
}

/// Ask for confirmation before deleting the highlighted conversation.
pub fn request_delete(app: &mut App) {
    let id = app.conversations.selected_item().map(|c| c.id.clone());
    if id.is_some() {
        app.conversations.confirm_delete = id;
    }
}

/// Fire the delete after the user confirmed.
pub fn confirm_delete(app: &mut App) {
    let Some(id) = app.conversations.confirm_delete.take() else {
        return;
    };
    let client = app.client.clone();
    let tx = app.event_tx.clone();
    tokio::task::spawn_local(async move {
        let result = client.delete_conversation(&id).await.map_err(|e| format!("{e:#}"));
        let _ = tx.send(ClientEvent::DeleteFinished { conversation_id: id, result });
    });
}

/// Apply a finished delete: drop the row, clamp the selection, and reset
/// the transcript when the open conversation was the one removed.
pub fn apply_delete(app: &mut App, conversation_id: &str) {
    app.conversations.items.retain(|c| c.id != conversation_id);
    if !app.conversations.items.is_empty() {
        app.conversations.selected =
            app.conversations.selected.min(app.conversations.items.len() - 1);
    } else {
        app.conversations.selected = 0;
    }
    if app.transcript.conversation_id.as_deref() == Some(conversation_id) {
        app.transcript.clear();
        app.turn += 1;
    }
}

/// Apply a freshly loaded history, unless the user has moved on since the
/// fetch started or a turn began meanwhile (detach semantics).
pub fn apply_loaded_messages(
    app: &mut App,
    conversation_id: String,
    messages: Vec<crate::api::types::StoredMessage>,
) {
    if app.conversations.pending_load.as_deref() != Some(conversation_id.as_str()) {
        tracing::debug!("dropping stale history for {conversation_id}");
        return;
    }
    app.conversations.pending_load = None;
    if !app.transcript.can_submit() {
        tracing::debug!("dropping history load that raced a send");
        return;
    }
    app.transcript.replace_with_history(conversation_id, messages, now_millis());
    app.auto_scroll = true;
}

/// Relative label for a conversation's `updated_at`, the same buckets the
/// web sidebar shows.
#[must_use]
pub fn relative_time_label(updated_at: &str, now_epoch_s: i64) -> String {
    let Some(then) = parse_epoch_seconds(updated_at) else {
        // Unknown format: show the date part if there is one.
        return updated_at.get(..10).unwrap_or(updated_at).to_owned();
    };
    let diff = now_epoch_s.saturating_sub(then);
    if diff < 60 {
        "방금 전".to_owned()
    } else if diff < 3_600 {
        format!("{}분 전", diff / 60)
    } else if diff < 86_400 {
        format!("{}시간 전", diff / 3_600)
    } else if diff < 2 * 86_400 {
        "어제".to_owned()
    } else if diff < 7 * 86_400 {
        format!("{}일 전", diff / 86_400)
    } else {
        match parse_month_day(updated_at) {
            Some((month, day)) => format!("{month}월 {day}일"),
            None => updated_at.get(..10).unwrap_or(updated_at).to_owned(),
        }
    }
}

/// Parse `YYYY-MM-DDTHH:MM:SS[...]` as UTC epoch seconds. Fractional
/// seconds and zone suffixes are ignored; the relative buckets above are
/// far coarser than any zone skew.
fn parse_epoch_seconds(ts: &str) -> Option<i64> {
    let year: i64 = ts.get(0..4)?.parse().ok()?;
    if ts.as_bytes().get(4) != Some(&b'-') || ts.as_bytes().get(7) != Some(&b'-') {
        return None;
    }
    let month: i64 = ts.get(5..7)?.parse().ok()?;
    let day: i64 = ts.get(8..10)?.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    let (hour, minute, second) = if ts.len() >= 19 && matches!(ts.as_bytes().get(10), Some(b'T' | b' ')) {
        (
            ts.get(11..13)?.parse().ok()?,
            ts.get(14..16)?.parse().ok()?,
            ts.get(17..19)?.parse().ok()?,
        )
    } else {
        (0, 0, 0)
    };

    Some(days_from_civil(year, month, day) * 86_400 + hour * 3_600 + minute * 60 + second)
}

fn parse_month_day(ts: &str) -> Option<(i64, i64)> {
    let month: i64 = ts.get(5..7)?.parse().ok()?;
    let day: i64 = ts.get(8..10)?.parse().ok()?;
    Some((month, day))
}

/// Days since 1970-01-01 for a proleptic Gregorian civil date
/// (Howard Hinnant's `days_from_civil`).
fn days_from_civil(y: i64, m: i64, d: i64) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

#[cfg(test)]
mod tests {
    use super::{parse_epoch_seconds, relative_time_label};
    use pretty_assertions::assert_eq;

    // 2025-08-07T12:00:00Z
    const NOW: i64 = 1_754_568_000;

    #[test]
    fn epoch_parse_matches_known_timestamp() {
        assert_eq!(parse_epoch_seconds("2025-08-07T12:00:00+00:00"), Some(NOW));
        assert_eq!(parse_epoch_seconds("1970-01-01T00:00:00Z"), Some(0));
    }

    #[test]
    fn date_only_timestamps_parse_at_midnight() {
        assert_eq!(parse_epoch_seconds("1970-01-02"), Some(86_400));
    }

    #[test]
    fn garbage_timestamps_are_rejected() {
        assert_eq!(parse_epoch_seconds("yesterday"), None);
        assert_eq!(parse_epoch_seconds(""), None);
        assert_eq!(parse_epoch_seconds("2025/08/07"), None);
    }

    #[test]
    fn relative_buckets_match_the_web_sidebar() {
        assert_eq!(relative_time_label("2025-08-07T11:59:40Z", NOW), "방금 전");
        assert_eq!(relative_time_label("2025-08-07T11:30:00Z", NOW), "30분 전");
        assert_eq!(relative_time_label("2025-08-07T08:00:00Z", NOW), "4시간 전");
        assert_eq!(relative_time_label("2025-08-06T08:00:00Z", NOW), "어제");
        assert_eq!(relative_time_label("2025-08-03T12:00:00Z", NOW), "4일 전");
        assert_eq!(relative_time_label("2025-06-01T12:00:00Z", NOW), "6월 1일");
    }

    #[test]
    fn unparsable_label_falls_back_to_date_prefix() {
        assert_eq!(relative_time_label("not-a-date", NOW), "not-a-date");
    }
}
