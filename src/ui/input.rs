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

use crate::app::{App, Focus};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

/// Horizontal inset before the prompt character.
const INPUT_PAD: u16 = 1;
/// "❯ " / "  " prefix width in columns.
const PREFIX_WIDTH: u16 = 2;

const PLACEHOLDER: &str = "질문을 입력하세요... (예: 창세기 1:1 의미)";

pub fn compute_height(app: &App) -> u16 {
    app.input.line_count().clamp(1, 4)
}

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    app.cached_input_area = area;
    if area.height == 0 || area.width <= INPUT_PAD + PREFIX_WIDTH {
        return;
    }

    let busy = !app.transcript.can_submit();
    let mut lines: Vec<Line<'static>> = Vec::with_capacity(usize::from(area.height));

    if app.input.is_empty() && !busy {
        lines.push(Line::from(vec![
            prompt_span(app, busy),
            Span::styled(PLACEHOLDER.to_owned(), Style::default().fg(theme::DIM)),
        ]));
    } else {
        // Keep the cursor row visible when the editor is taller than the box.
        let visible = usize::from(area.height);
        let first = app.input.cursor_row.saturating_sub(visible - 1);
        for (i, raw) in app.input.lines.iter().enumerate().skip(first).take(visible) {
            let prefix = if i == 0 {
                prompt_span(app, busy)
            } else {
                Span::raw("  ")
            };
            let style = if busy { Style::default().fg(theme::DIM) } else { Style::default() };
            lines.push(Line::from(vec![prefix, Span::styled(raw.clone(), style)]));
        }

        // Cursor only while the editor owns the keyboard.
        if matches!(app.focus, Focus::Input) && !busy && app.mention.is_none() {
            let row_on_screen = app.input.cursor_row.saturating_sub(first);
            let col_chars: String = app
                .input
                .lines
                .get(app.input.cursor_row)
                .map(|l| l.chars().take(app.input.cursor_col).collect())
                .unwrap_or_default();
            let col_width = u16::try_from(UnicodeWidthStr::width(col_chars.as_str()))
                .unwrap_or(u16::MAX);
            let x = (area.x + INPUT_PAD + PREFIX_WIDTH)
                .saturating_add(col_width)
                .min(area.right().saturating_sub(1));
            let y = area.y + u16::try_from(row_on_screen).unwrap_or(0);
            frame.set_cursor_position((x, y));
        }
    }

    let padded = Rect { x: area.x + INPUT_PAD, width: area.width - INPUT_PAD, ..area };
    frame.render_widget(Paragraph::new(lines), padded);
}

fn prompt_span(app: &App, busy: bool) -> Span<'static> {
    if busy {
        Span::styled(
            format!("{} ", theme::spinner(app.spinner_frame)),
            Style::default().fg(theme::SCRIPTURE_GOLD),
        )
    } else {
        Span::styled(
            format!("{} ", theme::PROMPT_CHAR),
            Style::default().fg(theme::SCRIPTURE_GOLD),
        )
    }
}
