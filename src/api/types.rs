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

use serde::{Deserialize, Serialize};

/// One scripture citation attached to a completed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub book: String,
    pub chapter: String,
    pub verse: String,
    pub content: String,
}

/// Body for both `POST /api/chat` and `POST /api/chat/stream`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

/// Response of the non-streaming chat endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub sources: Option<Vec<Source>>,
}

/// One row of `GET /api/conversations`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub first_message: Option<String>,
}

impl Conversation {
    /// Sidebar label: explicit title, else the first message, else an id stub.
    #[must_use]
    pub fn display_title(&self) -> String {
        if let Some(title) = self
            .metadata
            .as_ref()
            .and_then(|m| m.get("title"))
            .and_then(|t| t.as_str())
            .filter(|t| !t.trim().is_empty())
        {
            return title.to_owned();
        }
        if let Some(first) = self.first_message.as_deref().filter(|f| !f.trim().is_empty()) {
            return first.to_owned();
        }
        let stub: String = self.id.chars().take(8).collect();
        format!("대화 {stub}...")
    }

    /// Title as currently known, used to seed the rename editor.
    #[must_use]
    pub fn editable_title(&self) -> String {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("title"))
            .and_then(|t| t.as_str())
            .map(str::to_owned)
            .or_else(|| self.first_message.clone())
            .unwrap_or_default()
    }

    /// Store a freshly confirmed title in the local metadata copy.
    pub fn set_title(&mut self, title: &str) {
        let meta = self.metadata.get_or_insert_with(|| serde_json::json!({}));
        if let Some(obj) = meta.as_object_mut() {
            obj.insert("title".to_owned(), serde_json::Value::String(title.to_owned()));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversationsResponse {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

/// One persisted message row of `GET /api/conversations/{id}/messages`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredMessage {
    #[serde(default)]
    pub id: Option<String>,
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub messages: Vec<StoredMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
