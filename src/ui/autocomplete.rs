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

use crate::app::App;
use crate::app::mention::{self, MAX_VISIBLE, POPUP_HEIGHT, POPUP_MARGIN, POPUP_WIDTH, Placement};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn is_active(app: &App) -> bool {
    app.mention.is_some()
}

/// Render the scripture picker as a floating overlay at its anchor.
///
/// The anchor stored at open time is provisional; every render pass
/// recomputes it from the real input geometry (second phase of the
/// two-phase placement), so the popup settles on the correct side without
/// ever waiting for layout before showing.
pub fn render(frame: &mut Frame, app: &mut App) {
    let frame_area = app.cached_frame_area;
    resolve_anchor(app, frame_area);

    let Some(state) = &app.mention else {
        app.cached_dropdown_area = None;
        return;
    };

    let rows = if state.candidates.is_empty() {
        1
    } else {
        state.candidates.len().min(MAX_VISIBLE)
    };
    let height = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2);
    let width = POPUP_WIDTH.min(frame_area.width);

    // For an upward popup shorter than the fixed height, hug the trigger.
    let y = match state.anchor.placement {
        Placement::Above => state.anchor.y + POPUP_HEIGHT.saturating_sub(height),
        Placement::Below => state.anchor.y,
    };
    let y = y.min(frame_area.bottom().saturating_sub(height));
    let area = Rect { x: state.anchor.x, y, width, height };

    let block = Block::default()
        .title(Span::styled(" 성경 선택 ", Style::default().fg(theme::DIM)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::DIM));

    let mut lines: Vec<Line<'static>> = Vec::with_capacity(rows);
    if state.candidates.is_empty() {
        lines.push(Line::from(Span::styled(
            " 검색 결과가 없습니다",
            Style::default().fg(theme::DIM),
        )));
    } else {
        let start = state.scroll_offset;
        let end = (start + MAX_VISIBLE).min(state.candidates.len());
        let inner_width = usize::from(width.saturating_sub(2));
        for (i, book) in state.candidates[start..end].iter().enumerate() {
            let selected = start + i == state.selected;
            let mut spans: Vec<Span<'static>> = Vec::new();
            if selected {
                spans.push(Span::styled(
                    " ▸ ",
                    Style::default().fg(theme::SCRIPTURE_GOLD).add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::raw("   "));
            }
            spans.push(name_spans_with_highlight(book.name, &state.query, selected));

            // category right-aligned
            let used = 3 + UnicodeWidthStr::width(book.name);
            let cat_width = UnicodeWidthStr::width(book.category);
            if used + cat_width + 1 < inner_width {
                let gap = inner_width - used - cat_width;
                spans.push(Span::raw(" ".repeat(gap)));
                spans.push(Span::styled(
                    book.category.to_owned(),
                    Style::default().fg(theme::DIM),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    // Solid background so transcript text does not bleed through.
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
    app.cached_dropdown_area = Some(area);
}

/// Second-phase placement: recompute the anchor from the rendered input
/// geometry. The trigger rect is the `@` cell (typed) or the caret cell
/// (picker shortcut).
fn resolve_anchor(app: &mut App, frame_area: Rect) {
    let input_area = app.cached_input_area;
    let Some(state) = &mut app.mention else { return };

    let col = u16::try_from(state.trigger_col).unwrap_or(u16::MAX);
    let row = u16::try_from(state.trigger_row).unwrap_or(u16::MAX);
    let trigger = Rect {
        x: input_area
            .x
            .saturating_add(3)
            .saturating_add(col)
            .min(input_area.right().saturating_sub(1)),
        y: input_area.y.saturating_add(row).min(input_area.bottom().saturating_sub(1)),
        width: 1,
        height: 1,
    };

    let width = POPUP_WIDTH.min(frame_area.width);
    state.anchor = mention::compute_anchor(trigger, frame_area, width, POPUP_HEIGHT, POPUP_MARGIN);
    state.anchor_resolved = true;
}

fn name_spans_with_highlight(name: &str, query: &str, selected: bool) -> Span<'static> {
    // Exact-substring filter means the whole name either matched or the
    // query was empty; per-character highlighting adds nothing here.
    let style = if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else if !query.is_empty() {
        Style::default().fg(theme::SCRIPTURE_GOLD)
    } else {
        Style::default()
    };
    Span::styled(name.to_owned(), style)
}
