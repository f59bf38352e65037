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

use crate::api::error_handling::{GENERIC_RETRY_MESSAGE, user_facing_stream_error};
use crate::api::sse::StreamEvent;
use crate::api::types::{ChatResponse, Source, StoredMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    /// Placeholder shown, no tokens received yet.
    Pending,
    /// Receiving tokens; `text` is append-only in this state.
    Streaming,
    Complete,
    Errored,
}

/// One turn in the transcript. `id` never changes after creation and the
/// message order is insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    pub status: MessageStatus,
    pub created_at_ms: u64,
    pub sources: Vec<Source>,
}

/// Per-conversation turn phase. `Loading` covers the span between submit
/// and the first token; `Streaming` while tokens arrive. Submission and
/// transcript reloads are only allowed in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Streaming,
}

/// Explicit outcome of applying one stream event, consumed by the UI loop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Applied {
    /// The backend assigned a conversation id this client did not hold yet.
    pub adopted_conversation_id: Option<String>,
    /// The stream reached a terminal state; the loading indicator clears.
    pub finished: bool,
}

impl Applied {
    fn finished() -> Self {
        Self { adopted_conversation_id: None, finished: true }
    }
}

/// The ordered message list of the current conversation plus its turn
/// phase. The only writers are [`Transcript::apply`] while a send is in
/// flight and [`Transcript::replace_with_history`] on conversation
/// selection; callers keep those from interleaving by checking `phase`.
#[derive(Debug, Default)]
pub struct Transcript {
    pub messages: Vec<ChatMessage>,
    pub phase: Phase,
    /// Backend-assigned identity; `None` until a `start` event names one.
    pub conversation_id: Option<String>,
    last_client_id_ms: u64,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Millisecond timestamps double as client-side message ids; bump by
    /// one when several messages are created within the same millisecond.
    fn next_client_id(&mut self, now_ms: u64) -> String {
        let id_ms = now_ms.max(self.last_client_id_ms + 1);
        self.last_client_id_ms = id_ms;
        id_ms.to_string()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Start a turn: append the user message and a pending assistant
    /// placeholder. Rejected (returns false) while a turn is in flight, so
    /// the transcript never holds two live streaming messages.
    pub fn begin_turn(&mut self, text: &str, now_ms: u64) -> bool {
        if !self.can_submit() {
            return false;
        }
        let user_id = self.next_client_id(now_ms);
        self.messages.push(ChatMessage {
            id: user_id,
            role: MessageRole::User,
            text: text.to_owned(),
            status: MessageStatus::Complete,
            created_at_ms: now_ms,
            sources: Vec::new(),
        });
        let assistant_id = self.next_client_id(now_ms);
        self.messages.push(ChatMessage {
            id: assistant_id,
            role: MessageRole::Assistant,
            text: String::new(),
            status: MessageStatus::Pending,
            created_at_ms: now_ms,
            sources: Vec::new(),
        });
        self.phase = Phase::Loading;
        true
    }

    /// Fold one decoded stream event into the transcript, in arrival order.
    /// After a terminal event has been honored the phase is `Idle` and any
    /// further events for the same stream are ignored.
    pub fn apply(&mut self, event: StreamEvent) -> Applied {
        if matches!(self.phase, Phase::Idle) {
            tracing::debug!("stream event arrived after terminal state; ignored");
            return Applied::default();
        }
        match event {
            StreamEvent::Start { conversation_id } => self.adopt(conversation_id),
            StreamEvent::Token { content } => {
                self.phase = Phase::Streaming;
                if let Some(message) = self.active_assistant_mut() {
                    if matches!(message.status, MessageStatus::Pending) {
                        // First token replaces the placeholder.
                        message.status = MessageStatus::Streaming;
                        message.text = content;
                    } else {
                        // Later tokens append, never replace.
                        message.text.push_str(&content);
                    }
                }
                Applied::default()
            }
            StreamEvent::Done { sources } => {
                if let Some(message) = self.active_assistant_mut() {
                    if let Some(sources) = sources {
                        message.sources = sources;
                    }
                    message.status = MessageStatus::Complete;
                }
                self.phase = Phase::Idle;
                Applied::finished()
            }
            StreamEvent::Error { content } => {
                let text = user_facing_stream_error(content.as_deref());
                if let Some(message) = self.active_assistant_mut() {
                    message.text = text;
                    message.status = MessageStatus::Errored;
                }
                self.phase = Phase::Idle;
                Applied::finished()
            }
        }
    }

    /// The transport completed without ever emitting `done` or `error`.
    /// The finished signal is still forced so the UI cannot hang in a
    /// perpetual streaming state.
    pub fn finish_without_terminal(&mut self) -> Applied {
        if matches!(self.phase, Phase::Idle) {
            return Applied::default();
        }
        tracing::warn!("chat stream ended without a terminal event");
        if let Some(message) = self.active_assistant_mut() {
            match message.status {
                MessageStatus::Pending => {
                    message.text = GENERIC_RETRY_MESSAGE.to_owned();
                    message.status = MessageStatus::Errored;
                }
                MessageStatus::Streaming => message.status = MessageStatus::Complete,
                MessageStatus::Complete | MessageStatus::Errored => {}
            }
        }
        self.phase = Phase::Idle;
        Applied::finished()
    }

    /// The transport failed before a terminal event. Drives the
    /// conversation to a non-streaming state with a generic error shown as
    /// an assistant message (synthesized if no placeholder survives).
    pub fn fail_transport(&mut self, detail: &str, now_ms: u64) -> Applied {
        tracing::error!("chat stream transport failed: {detail}");
        if matches!(self.phase, Phase::Idle) {
            return Applied::default();
        }
        if let Some(message) = self.active_assistant_mut() {
            message.text = GENERIC_RETRY_MESSAGE.to_owned();
            message.status = MessageStatus::Errored;
        } else {
            let id = self.next_client_id(now_ms);
            self.messages.push(ChatMessage {
                id,
                role: MessageRole::Assistant,
                text: GENERIC_RETRY_MESSAGE.to_owned(),
                status: MessageStatus::Errored,
                created_at_ms: now_ms,
                sources: Vec::new(),
            });
        }
        self.phase = Phase::Idle;
        Applied::finished()
    }

    /// Apply a complete non-streaming answer to the pending placeholder.
    pub fn apply_answer(&mut self, response: ChatResponse) -> Applied {
        if matches!(self.phase, Phase::Idle) {
            return Applied::default();
        }
        let adopted = self.adopt(response.conversation_id);
        if let Some(message) = self.active_assistant_mut() {
            message.text = response.answer;
            message.sources = response.sources.unwrap_or_default();
            message.status = MessageStatus::Complete;
        }
        self.phase = Phase::Idle;
        Applied { finished: true, ..adopted }
    }

    /// Replace the transcript with persisted history. Callers must not
    /// invoke this while a turn is in flight (`phase != Idle`).
    pub fn replace_with_history(
        &mut self,
        conversation_id: String,
        messages: Vec<StoredMessage>,
        now_ms: u64,
    ) {
        self.conversation_id = Some(conversation_id);
        self.messages.clear();
        for stored in messages {
            let role = match stored.role.as_str() {
                "user" => MessageRole::User,
                "assistant" => MessageRole::Assistant,
                other => {
                    tracing::debug!("skipping stored message with role `{other}`");
                    continue;
                }
            };
            let id = stored.id.unwrap_or_else(|| self.next_client_id(now_ms));
            self.messages.push(ChatMessage {
                id,
                role,
                text: stored.content,
                status: MessageStatus::Complete,
                created_at_ms: now_ms,
                sources: Vec::new(),
            });
        }
        self.phase = Phase::Idle;
    }

    /// Reset to an empty, unidentified conversation ("새 대화").
    pub fn clear(&mut self) {
        self.messages.clear();
        self.conversation_id = None;
        self.phase = Phase::Idle;
    }

    /// The newest completed assistant answer, for the copy shortcut.
    #[must_use]
    pub fn latest_answer(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| {
            matches!(m.role, MessageRole::Assistant)
                && matches!(m.status, MessageStatus::Complete)
        })
    }

    /// Identity is adopted at most once per client lifetime; a `start`
    /// event naming a different id than the current one is ignored.
    fn adopt(&mut self, conversation_id: Option<String>) -> Applied {
        match conversation_id {
            Some(id) if self.conversation_id.is_none() => {
                self.conversation_id = Some(id.clone());
                Applied { adopted_conversation_id: Some(id), finished: false }
            }
            Some(id) => {
                if self.conversation_id.as_deref() != Some(id.as_str()) {
                    tracing::warn!("start event named conversation {id}; keeping current");
                }
                Applied::default()
            }
            None => Applied::default(),
        }
    }

    /// The in-flight assistant message: the last message, when it is an
    /// assistant turn still pending or streaming.
    fn active_assistant_mut(&mut self) -> Option<&mut ChatMessage> {
        self.messages.last_mut().filter(|m| {
            matches!(m.role, MessageRole::Assistant)
                && matches!(m.status, MessageStatus::Pending | MessageStatus::Streaming)
        })
    }
}

/// Current wall-clock in milliseconds, the source for client message ids.
#[must_use]
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
