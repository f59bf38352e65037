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

use crate::app::conversations::relative_time_label;
use crate::app::{App, Focus};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    app.cached_sidebar_area = area;
    if area.width < 10 || area.height < 4 {
        return;
    }

    let focused = matches!(app.focus, Focus::Sidebar);
    let border_color = if focused { theme::SCRIPTURE_GOLD } else { theme::DIM };
    let block = Block::default()
        .title(Span::styled(" 대화 내역 ", Style::default().fg(border_color)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line<'static>> = Vec::new();

    if app.conversations.loading {
        lines.push(Line::from(Span::styled(
            "불러오는 중...",
            Style::default().fg(theme::DIM),
        )));
    } else if app.conversations.items.is_empty() {
        lines.push(Line::from(Span::styled(
            "아직 저장된 대화가 없습니다.",
            Style::default().fg(theme::DIM),
        )));
    } else {
        let now = now_epoch_seconds();
        let visible = usize::from(inner.height.saturating_sub(1)).max(1);
        // Keep the highlighted row inside the window.
        let first = app.conversations.selected.saturating_sub(visible - 1);
        for (idx, conv) in app.conversations.items.iter().enumerate().skip(first).take(visible) {
            let selected = idx == app.conversations.selected;
            let is_open = app.transcript.conversation_id.as_deref() == Some(conv.id.as_str());

            if let Some(editing) = &app.conversations.editing {
                if editing.conversation_id == conv.id {
                    lines.push(rename_line(&editing.buffer, editing.cursor, inner.width));
                    continue;
                }
            }

            let marker = if is_open { "● " } else { "  " };
            let time = relative_time_label(&conv.updated_at, now);
            let title = fit_title(&conv.display_title(), inner.width, &time);
            let style = if selected && focused {
                Style::default().bg(theme::SELECTED_BG).add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default().bg(theme::SELECTED_BG)
            } else {
                Style::default()
            };
            lines.push(
                Line::from(vec![
                    Span::styled(marker.to_owned(), Style::default().fg(theme::SCRIPTURE_GOLD)),
                    Span::raw(title),
                    Span::styled(format!(" {time}"), Style::default().fg(theme::DIM)),
                ])
                .style(style),
            );
        }
    }

    // Bottom hint (or the pending delete confirmation)
    if inner.height > 1 {
        let hint_area = Rect { y: inner.bottom() - 1, height: 1, ..inner };
        let hint = if app.conversations.confirm_delete.is_some() {
            Line::from(Span::styled(
                "이 대화를 삭제하시겠습니까? (y/n)",
                Style::default().fg(theme::STATUS_ERROR),
            ))
        } else if focused {
            Line::from(Span::styled(
                "Enter 열기 · n 새 대화 · r 제목 · d 삭제",
                Style::default().fg(theme::DIM),
            ))
        } else {
            Line::from(Span::styled("Tab 대화 목록", Style::default().fg(theme::DIM)))
        };
        frame.render_widget(Paragraph::new(hint), hint_area);
    }

    let list_area = Rect { height: inner.height.saturating_sub(1), ..inner };
    frame.render_widget(Paragraph::new(lines), list_area);
}

/// Inline rename editor row with a visible caret.
fn rename_line(buffer: &str, cursor: usize, _width: u16) -> Line<'static> {
    let before: String = buffer.chars().take(cursor).collect();
    let after: String = buffer.chars().skip(cursor).collect();
    Line::from(vec![
        Span::styled("✎ ".to_owned(), Style::default().fg(theme::SCRIPTURE_GOLD)),
        Span::raw(before),
        Span::styled("│".to_owned(), Style::default().fg(theme::SCRIPTURE_GOLD)),
        Span::raw(after),
    ])
}

/// Truncate a title so `title + time` fits the sidebar width.
fn fit_title(title: &str, width: u16, time: &str) -> String {
    let reserved = 2 + UnicodeWidthStr::width(time) + 2;
    let budget = usize::from(width).saturating_sub(reserved);
    if UnicodeWidthStr::width(title) <= budget {
        return title.to_owned();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in title.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn now_epoch_seconds() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
