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

pub mod books;
pub mod conversations;
pub mod events;
mod input;
mod input_submit;
pub mod mention;
mod state;
pub mod transcript;

pub use events::{handle_client_event, handle_terminal_event};
pub use input::InputState;
pub use state::{App, Focus, HealthState};

use crate::Cli;
use crate::api::client::ApiClient;
use crate::api::events::ClientEvent;
use crate::error::AppError;
use crossterm::event::EventStream;
use futures::{FutureExt as _, StreamExt as _};
use std::time::{Duration, Instant};
use transcript::Phase;

/// Build the app from CLI configuration. Instant, no I/O.
pub fn create_app(cli: &Cli) -> Result<App, AppError> {
    let client = ApiClient::new(&cli.api_url)?;
    Ok(App::new(client, !cli.no_stream))
}

/// Kick off the startup probes: backend health and the first conversation
/// list fetch. Both report back over the event channel.
pub fn start_background_probes(app: &mut App) {
    let client = app.client.clone();
    let tx = app.event_tx.clone();
    tokio::task::spawn_local(async move {
        let result = client.health().await.map_err(|e| format!("{e:#}"));
        let _ = tx.send(ClientEvent::HealthChecked(result));
    });
    conversations::start_list_refresh(app);
}

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Enable bracketed paste and mouse capture (ignore error on unsupported terminals)
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::EnableBracketedPaste,
        crossterm::event::EnableMouseCapture,
    );

    let mut terminal_events = EventStream::new();
    let tick_duration = Duration::from_millis(16);
    let mut last_render = Instant::now();

    loop {
        // Phase 1: wait for at least one event or the next frame tick
        let time_to_next = tick_duration.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = terminal_events.next() => {
                events::handle_terminal_event(app, event);
            }
            Some(event) = app.event_rx.recv() => {
                events::handle_client_event(app, event);
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // Phase 2: drain all remaining queued events (non-blocking)
        loop {
            // Terminal events first (keeps typing responsive)
            if let Some(Some(Ok(event))) = terminal_events.next().now_or_never() {
                events::handle_terminal_event(app, event);
                continue;
            }
            match app.event_rx.try_recv() {
                Ok(event) => events::handle_client_event(app, event),
                Err(_) => break,
            }
        }

        if app.should_quit {
            break;
        }

        // Phase 3: render once
        if !matches!(app.transcript.phase, Phase::Idle) {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
        }
        terminal.draw(|frame| crate::ui::render(frame, app))?;
        last_render = Instant::now();
    }

    // Restore terminal
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableBracketedPaste,
        crossterm::event::DisableMouseCapture,
    );
    ratatui::restore();

    Ok(())
}
