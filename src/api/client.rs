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

use crate::api::events::ClientEvent;
use crate::api::sse::SseFrameDecoder;
use crate::api::types::{
    ChatRequest, ChatResponse, Conversation, ConversationsResponse, HealthResponse,
    MessagesResponse, StoredMessage,
};
use crate::error::AppError;
use anyhow::Context as _;
use futures::StreamExt as _;
use tokio::sync::mpsc;

/// Thin typed wrapper over the backend's REST/SSE surface.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::InvalidApiUrl { url: base_url.to_owned() });
        }
        let http = reqwest::Client::builder().build().map_err(|_| AppError::HttpClientInit)?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn health(&self) -> anyhow::Result<HealthResponse> {
        let resp = self
            .http
            .get(self.url("/api/health"))
            .send()
            .await
            .context("health request failed")?
            .error_for_status()
            .context("health check returned an error status")?;
        resp.json().await.context("failed to decode health response")
    }

    pub async fn list_conversations(&self) -> anyhow::Result<Vec<Conversation>> {
        let resp = self
            .http
            .get(self.url("/api/conversations"))
            .send()
            .await
            .context("conversation list request failed")?
            .error_for_status()
            .context("conversation list returned an error status")?;
        let body: ConversationsResponse =
            resp.json().await.context("failed to decode conversation list")?;
        Ok(body.conversations)
    }

    pub async fn conversation_messages(&self, id: &str) -> anyhow::Result<Vec<StoredMessage>> {
        let resp = self
            .http
            .get(self.url(&format!("/api/conversations/{id}/messages")))
            .send()
            .await
            .context("message list request failed")?
            .error_for_status()
            .context("message list returned an error status")?;
        let body: MessagesResponse = resp.json().await.context("failed to decode message list")?;
        Ok(body.messages)
    }

    pub async fn rename_conversation(&self, id: &str, title: &str) -> anyhow::Result<()> {
        self.http
            .patch(self.url(&format!("/api/conversations/{id}")))
            .query(&[("title", title)])
            .send()
            .await
            .context("rename request failed")?
            .error_for_status()
            .context("rename returned an error status")?;
        Ok(())
    }

    pub async fn delete_conversation(&self, id: &str) -> anyhow::Result<()> {
        self.http
            .delete(self.url(&format!("/api/conversations/{id}")))
            .send()
            .await
            .context("delete request failed")?
            .error_for_status()
            .context("delete returned an error status")?;
        Ok(())
    }

    /// Non-streaming send: one request, one complete answer.
    pub async fn send_message(
        &self,
        message: &str,
        conversation_id: Option<&str>,
    ) -> anyhow::Result<ChatResponse> {
        let request = ChatRequest {
            message: message.to_owned(),
            conversation_id: conversation_id.map(str::to_owned),
        };
        let resp = self
            .http
            .post(self.url("/api/chat"))
            .json(&request)
            .send()
            .await
            .context("chat request failed")?
            .error_for_status()
            .context("chat returned an error status")?;
        resp.json().await.context("failed to decode chat response")
    }

    /// Streaming send: POST the request and pump decoded frames into `tx`.
    ///
    /// Every outcome (terminal event, transport end, transport failure)
    /// surfaces as a `ClientEvent`; the UI loop never awaits this future
    /// directly. Events are emitted strictly in arrival order.
    pub async fn stream_message(
        &self,
        message: String,
        conversation_id: Option<String>,
        turn: u64,
        tx: mpsc::UnboundedSender<ClientEvent>,
    ) {
        let request = ChatRequest { message, conversation_id };
        let resp = match self.http.post(self.url("/api/chat/stream")).json(&request).send().await
        {
            Ok(resp) => resp,
            Err(err) => {
                let _ = tx.send(ClientEvent::StreamFailed { turn, message: err.to_string() });
                return;
            }
        };

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!("chat stream rejected with {status}: {body}");
            let _ =
                tx.send(ClientEvent::StreamFailed { turn, message: format!("HTTP {status}") });
            return;
        }

        let mut decoder = SseFrameDecoder::default();
        let mut body = resp.bytes_stream();
        while let Some(chunk) = body.next().await {
            match chunk {
                Ok(bytes) => {
                    for event in decoder.feed(&bytes) {
                        if tx.send(ClientEvent::Stream { turn, event }).is_err() {
                            // UI loop is gone; nothing left to deliver to.
                            return;
                        }
                    }
                }
                Err(err) => {
                    let _ =
                        tx.send(ClientEvent::StreamFailed { turn, message: err.to_string() });
                    return;
                }
            }
        }

        // A partial trailing frame still counts when the transport ends.
        if let Some(event) = decoder.finish() {
            let _ = tx.send(ClientEvent::Stream { turn, event });
        }
        let _ = tx.send(ClientEvent::StreamClosed { turn });
    }
}
