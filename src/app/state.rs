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

use crate::api::client::ApiClient;
use crate::api::events::ClientEvent;
use crate::app::conversations::ConversationListState;
use crate::app::input::InputState;
use crate::app::mention::MentionState;
use crate::app::transcript::Transcript;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

/// Which pane owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Sidebar,
}

/// Result of the startup health probe, shown in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthState {
    Healthy(String),
    Unreachable(String),
}

pub struct App {
    pub transcript: Transcript,
    pub conversations: ConversationListState,
    pub input: InputState,
    pub mention: Option<MentionState>,
    pub focus: Focus,
    /// Blocking notice banner (the TUI stand-in for `alert()`); captures
    /// all input until dismissed with a keypress.
    pub notice: Option<String>,
    pub health: Option<HealthState>,
    /// Expand scripture citations under completed answers.
    pub show_sources: bool,
    pub auto_scroll: bool,
    pub scroll_offset: u16,
    pub should_quit: bool,
    pub spinner_frame: usize,
    /// Send counter; events carrying an older turn are dropped on arrival.
    pub turn: u64,
    pub use_streaming: bool,
    pub client: ApiClient,
    pub event_tx: mpsc::UnboundedSender<ClientEvent>,
    pub event_rx: mpsc::UnboundedReceiver<ClientEvent>,
    /// Last rendered geometry, for provisional anchors and click mapping.
    pub cached_frame_area: Rect,
    pub cached_input_area: Rect,
    pub cached_chat_area: Rect,
    pub cached_sidebar_area: Rect,
    pub cached_dropdown_area: Option<Rect>,
}

impl App {
    #[must_use]
    pub fn new(client: ApiClient, use_streaming: bool) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            transcript: Transcript::new(),
            conversations: ConversationListState::default(),
            input: InputState::new(),
            mention: None,
            focus: Focus::Input,
            notice: None,
            health: None,
            show_sources: false,
            auto_scroll: true,
            scroll_offset: 0,
            should_quit: false,
            spinner_frame: 0,
            turn: 0,
            use_streaming,
            client,
            event_tx,
            event_rx,
            cached_frame_area: Rect::default(),
            cached_input_area: Rect::default(),
            cached_chat_area: Rect::default(),
            cached_sidebar_area: Rect::default(),
            cached_dropdown_area: None,
        }
    }

    /// Build a minimal `App` for tests: no terminal, no network traffic.
    #[must_use]
    pub fn test_default() -> Self {
        let client = match ApiClient::new("http://localhost:8000") {
            Ok(client) => client,
            Err(_) => unreachable!("static test URL is valid"),
        };
        Self::new(client, true)
    }
}
