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

use crate::app::App;
use crate::ui::{message, theme};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

const CHAT_PAD: u16 = 1;

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    app.cached_chat_area = area;
    if area.height == 0 || area.width <= CHAT_PAD * 2 {
        return;
    }
    let padded = Rect {
        x: area.x + CHAT_PAD,
        width: area.width - CHAT_PAD * 2,
        ..area
    };

    let lines = if app.transcript.messages.is_empty() {
        welcome_lines()
    } else {
        let mut lines = Vec::new();
        for msg in &app.transcript.messages {
            lines.extend(message::build_lines(msg, app.show_sources, app.spinner_frame));
        }
        lines
    };

    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });

    // Stick to the bottom while auto-scroll is engaged; scrolling back to
    // the bottom manually re-engages it.
    let total = u16::try_from(paragraph.line_count(padded.width)).unwrap_or(u16::MAX);
    let max_scroll = total.saturating_sub(padded.height);
    if app.auto_scroll {
        app.scroll_offset = max_scroll;
    } else {
        app.scroll_offset = app.scroll_offset.min(max_scroll);
        if app.scroll_offset == max_scroll {
            app.auto_scroll = true;
        }
    }

    frame.render_widget(paragraph.scroll((app.scroll_offset, 0)), padded);
}

fn welcome_lines() -> Vec<Line<'static>> {
    vec![
        Line::default(),
        Line::from(Span::styled(
            "✟ 성경에 대해 궁금한 것을 물어보세요!",
            Style::default().fg(theme::SCRIPTURE_GOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "예: 창세기 1:1 의미 / @요한복음 3:16 해설",
            Style::default().fg(theme::DIM),
        )),
        Line::from(Span::styled(
            "@ 를 입력하면 성경 책 이름을 골라 넣을 수 있습니다.",
            Style::default().fg(theme::DIM),
        )),
    ]
}
