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

mod autocomplete;
mod chat;
mod header;
mod input;
mod layout;
mod message;
mod sidebar;
pub mod theme;

use crate::app::App;
use crate::app::transcript::Phase;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 8;

pub fn render(frame: &mut Frame, app: &mut App) {
    let frame_area = frame.area();
    app.cached_frame_area = frame_area;

    if frame_area.width < MIN_WIDTH || frame_area.height < MIN_HEIGHT {
        frame.render_widget(
            Paragraph::new("터미널 창이 너무 작습니다").alignment(Alignment::Center),
            frame_area,
        );
        return;
    }

    let areas = layout::compute(frame_area, input::compute_height(app));

    if areas.sidebar.width > 0 {
        sidebar::render(frame, areas.sidebar, app);
    } else {
        app.cached_sidebar_area = Rect::default();
    }
    header::render(frame, areas.header, app);
    render_separator(frame, areas.header_sep);
    chat::render(frame, areas.chat, app);
    render_separator(frame, areas.input_sep);
    input::render(frame, areas.input, app);
    render_footer(frame, areas.footer, app);

    // Floating overlays last, above everything else
    if autocomplete::is_active(app) {
        autocomplete::render(frame, app);
    } else {
        app.cached_dropdown_area = None;
    }
    if let Some(notice) = app.notice.clone() {
        render_notice(frame, frame_area, &notice);
    }
}

const FOOTER_PAD: u16 = 1;

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 || area.width <= FOOTER_PAD * 2 {
        return;
    }
    let padded = Rect { x: area.x + FOOTER_PAD, width: area.width - FOOTER_PAD * 2, ..area };

    let line = match app.transcript.phase {
        Phase::Idle => Line::from(vec![
            Span::styled("Enter", Style::default().fg(ratatui::style::Color::White)),
            Span::styled(" 전송 · ", Style::default().fg(theme::DIM)),
            Span::styled("@", Style::default().fg(ratatui::style::Color::White)),
            Span::styled(" 성경 선택 · ", Style::default().fg(theme::DIM)),
            Span::styled("Ctrl+B", Style::default().fg(ratatui::style::Color::White)),
            Span::styled(" 책 목록 · ", Style::default().fg(theme::DIM)),
            Span::styled("Tab", Style::default().fg(ratatui::style::Color::White)),
            Span::styled(" 대화 내역 · ", Style::default().fg(theme::DIM)),
            Span::styled("Ctrl+Y", Style::default().fg(ratatui::style::Color::White)),
            Span::styled(" 답변 복사 · ", Style::default().fg(theme::DIM)),
            Span::styled("Ctrl+C", Style::default().fg(ratatui::style::Color::White)),
            Span::styled(" 종료", Style::default().fg(theme::DIM)),
        ]),
        Phase::Loading | Phase::Streaming => Line::from(vec![
            Span::styled(
                format!("{} ", theme::spinner(app.spinner_frame)),
                Style::default().fg(theme::SCRIPTURE_GOLD),
            ),
            Span::styled("답변 생성 중... 전송이 잠시 비활성화됩니다", Style::default().fg(theme::DIM)),
        ]),
    };
    frame.render_widget(Paragraph::new(line), padded);
}

/// Blocking notice banner, the TUI counterpart of the web `alert()`.
fn render_notice(frame: &mut Frame, frame_area: Rect, notice: &str) {
    let text_width = u16::try_from(UnicodeWidthStr::width(notice)).unwrap_or(u16::MAX);
    let width = (text_width + 6).min(frame_area.width);
    let area = Rect {
        x: frame_area.x + (frame_area.width.saturating_sub(width)) / 2,
        y: frame_area.y + frame_area.height / 2,
        width,
        height: 3,
    };

    let block = Block::default()
        .title(Span::styled(" 알림 ", Style::default().fg(theme::SCRIPTURE_GOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::SCRIPTURE_GOLD));
    let body = Paragraph::new(Line::from(Span::raw(notice.to_owned())))
        .alignment(Alignment::Center)
        .block(block);

    frame.render_widget(Clear, area);
    frame.render_widget(body, area);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let sep_str = theme::SEPARATOR_CHAR.repeat(usize::from(area.width));
    let line = Line::from(Span::styled(sep_str, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line), area);
}
