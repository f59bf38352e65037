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
use crate::app::transcript::now_millis;

/// Submit the question editor.
///
/// Rejected while a turn is in flight: the transcript never holds two
/// simultaneously streaming assistant messages, and the editor content is
/// left untouched so the user can retry after the stream settles.
pub(super) fn submit_input(app: &mut App) {
    let text = app.input.text();
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !app.transcript.can_submit() {
        return;
    }

    // Dismiss any open mention dropdown
    app.mention = None;

    if !app.transcript.begin_turn(text, now_millis()) {
        return;
    }
    app.input.clear();
    app.auto_scroll = true;
    app.turn += 1;

    let turn = app.turn;
    let client = app.client.clone();
    let tx = app.event_tx.clone();
    let conversation_id = app.transcript.conversation_id.clone();
    let message = text.to_owned();

    if app.use_streaming {
        tokio::task::spawn_local(async move {
            client.stream_message(message, conversation_id, turn, tx).await;
        });
    } else {
        tokio::task::spawn_local(async move {
            let result = client
                .send_message(&message, conversation_id.as_deref())
                .await
                .map_err(|e| format!("{e:#}"));
            let _ = tx.send(ClientEvent::SendFinished { turn, result });
        });
    }
}
