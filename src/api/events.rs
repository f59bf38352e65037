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

use crate::api::sse::StreamEvent;
use crate::api::types::{ChatResponse, Conversation, HealthResponse, StoredMessage};

/// Messages sent from background API tasks to the App/UI loop.
///
/// Send-related variants carry the `turn` counter of the send that spawned
/// them; events from a superseded turn are dropped on arrival (detach
/// semantics, there is no abort primitive for an in-flight stream).
#[derive(Debug)]
pub enum ClientEvent {
    /// Decoded event from the active chat stream.
    Stream { turn: u64, event: StreamEvent },
    /// Stream transport completed without a terminal event.
    StreamClosed { turn: u64 },
    /// Stream transport failed before a terminal event.
    StreamFailed { turn: u64, message: String },
    /// Non-streaming send finished.
    SendFinished { turn: u64, result: Result<ChatResponse, String> },
    /// Conversation list fetch finished (fetch errors are log-only and
    /// never produce an event; stale data stays visible).
    ConversationsListed(Vec<Conversation>),
    /// Message history for a previously selected conversation.
    MessagesLoaded { conversation_id: String, messages: Vec<StoredMessage> },
    /// Rename finished; `Err` carries a user-facing notice.
    RenameFinished { conversation_id: String, title: String, result: Result<(), String> },
    /// Delete finished; `Err` carries a user-facing notice.
    DeleteFinished { conversation_id: String, result: Result<(), String> },
    /// Startup health probe result.
    HealthChecked(Result<HealthResponse, String>),
}
