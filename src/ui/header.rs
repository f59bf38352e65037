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

use crate::app::{App, HealthState};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HEADER_PAD: u16 = 1;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 || area.width <= HEADER_PAD * 2 {
        return;
    }
    let padded = Rect { x: area.x + HEADER_PAD, width: area.width - HEADER_PAD * 2, ..area };

    // Left half: title. Right half: health probe result.
    let left_width = padded.width / 2;
    let left = Rect { width: left_width, ..padded };
    let right = Rect {
        x: padded.x + left_width,
        width: padded.width - left_width,
        ..padded
    };

    let title = Line::from(vec![
        Span::styled("✟ ", Style::default().fg(theme::SCRIPTURE_GOLD)),
        Span::styled(
            "성경QA",
            Style::default().fg(theme::SCRIPTURE_GOLD).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" · 하나님의 말씀을 묻고 답하다", Style::default().fg(theme::DIM)),
    ]);
    frame.render_widget(Paragraph::new(title), left);

    let status = match &app.health {
        None => Line::from(Span::styled("● 연결 확인 중...", Style::default().fg(theme::DIM))),
        Some(HealthState::Healthy(message)) => Line::from(vec![
            Span::styled("● ", Style::default().fg(theme::STATUS_OK)),
            Span::styled(message.clone(), Style::default().fg(theme::DIM)),
        ]),
        Some(HealthState::Unreachable(_)) => Line::from(Span::styled(
            "● 서버에 연결할 수 없습니다",
            Style::default().fg(theme::STATUS_ERROR),
        )),
    };
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Right), right);
}
