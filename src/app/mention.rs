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

use super::App;
use crate::app::books::{BIBLE_BOOKS, BibleBook};
use ratatui::layout::Rect;

/// Maximum candidates shown in the dropdown.
pub const MAX_VISIBLE: usize = 8;

/// Dropdown height in rows (visible candidates + borders), the fixed popup
/// height the placement flip reasons about.
#[allow(clippy::cast_possible_truncation)]
pub const POPUP_HEIGHT: u16 = MAX_VISIBLE as u16 + 2;

/// Gap kept between the trigger and the popup.
pub const POPUP_MARGIN: u16 = 1;

/// Max dropdown width (columns).
pub const POPUP_WIDTH: u16 = 40;

/// How the mention context was opened. Mutually exclusive; decides where a
/// committed book name is spliced into the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    /// The user typed `@`; commit replaces the `@query` span.
    Typed,
    /// The picker shortcut (Ctrl+B); commit inserts at the caret.
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Above,
    Below,
}

/// Screen position chosen for the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorPosition {
    pub x: u16,
    pub y: u16,
    pub placement: Placement,
}

/// Ephemeral state of an open mention session.
pub struct MentionState {
    pub source: TriggerSource,
    /// Character position (row, col) of the triggering `@` (typed source).
    pub trigger_row: usize,
    pub trigger_col: usize,
    /// Text between the `@` and the caret, recomputed on every keystroke.
    pub query: String,
    pub candidates: Vec<&'static BibleBook>,
    /// Highlighted candidate, clamped to `[0, candidates.len() - 1]`.
    pub selected: usize,
    pub scroll_offset: usize,
    /// Provisional on open (below the input), corrected from real layout
    /// rects on the next render pass so nothing waits on geometry.
    pub anchor: AnchorPosition,
    pub anchor_resolved: bool,
}

/// Detect an `@` mention at the caret: scan backward on the caret's line;
/// hitting whitespace before an `@` means no trigger. Returns
/// `(trigger_row, trigger_col, query)` with `trigger_col` at the `@`.
pub fn detect_mention_at_cursor(
    lines: &[String],
    cursor_row: usize,
    cursor_col: usize,
) -> Option<(usize, usize, String)> {
    let line = lines.get(cursor_row)?;
    let chars: Vec<char> = line.chars().collect();
    let caret = cursor_col.min(chars.len());

    let mut i = caret;
    while i > 0 {
        i -= 1;
        let ch = *chars.get(i)?;
        if ch == '@' {
            let query: String = chars[i + 1..caret].iter().collect();
            return Some((cursor_row, i, query));
        }
        if ch.is_whitespace() {
            return None;
        }
    }
    None
}

/// Filter the catalog by exact, case-sensitive substring match against the
/// display name. Deliberately not fuzzy: this mirrors the service's picker.
pub fn filter_books(query: &str) -> Vec<&'static BibleBook> {
    BIBLE_BOOKS.iter().filter(|b| b.name.contains(query)).collect()
}

/// Compute where the dropdown goes relative to its trigger rect: flip
/// above when the space below cannot fit popup + margin AND there is more
/// room above; clamp x so the popup stays inside the viewport.
#[must_use]
pub fn compute_anchor(
    trigger: Rect,
    viewport: Rect,
    popup_width: u16,
    popup_height: u16,
    margin: u16,
) -> AnchorPosition {
    let space_below = viewport.bottom().saturating_sub(trigger.bottom());
    let space_above = trigger.y.saturating_sub(viewport.y);

    let flip_up = space_below < popup_height + margin && space_above > space_below;
    let (y, placement) = if flip_up {
        (trigger.y.saturating_sub(popup_height + margin), Placement::Above)
    } else {
        (trigger.bottom().saturating_add(margin), Placement::Below)
    };

    let max_x = viewport.right().saturating_sub(popup_width).max(viewport.x);
    let x = trigger.x.clamp(viewport.x, max_x);
    AnchorPosition { x, y, placement }
}

/// Provisional placement used synchronously at open time, before real
/// layout geometry exists: directly below the last rendered input area.
fn provisional_anchor(input_area: Rect) -> AnchorPosition {
    AnchorPosition {
        x: input_area.x,
        y: input_area.bottom().saturating_add(POPUP_MARGIN),
        placement: Placement::Below,
    }
}

/// Open the mention context after the user typed `@`.
pub fn activate_typed(app: &mut App) {
    let detection =
        detect_mention_at_cursor(&app.input.lines, app.input.cursor_row, app.input.cursor_col);
    let Some((trigger_row, trigger_col, query)) = detection else {
        return;
    };

    let candidates = filter_books(&query);
    app.mention = Some(MentionState {
        source: TriggerSource::Typed,
        trigger_row,
        trigger_col,
        query,
        candidates,
        selected: 0,
        scroll_offset: 0,
        anchor: provisional_anchor(app.cached_input_area),
        anchor_resolved: false,
    });
}

/// Toggle the picker shortcut: open with an empty query anchored at the
/// input, close when the popup is already showing (whatever opened it).
pub fn toggle_button(app: &mut App) {
    if app.mention.is_some() {
        app.mention = None;
        return;
    }
    app.mention = Some(MentionState {
        source: TriggerSource::Button,
        trigger_row: app.input.cursor_row,
        trigger_col: app.input.cursor_col,
        query: String::new(),
        candidates: filter_books(""),
        selected: 0,
        scroll_offset: 0,
        anchor: provisional_anchor(app.cached_input_area),
        anchor_resolved: false,
    });
}

/// Recompute the query from the buffer while the context is open. A typed
/// trigger closes once the backward scan no longer finds a qualifying `@`;
/// a button trigger survives with an empty query until dismissed.
pub fn update_query(app: &mut App) {
    let detection =
        detect_mention_at_cursor(&app.input.lines, app.input.cursor_row, app.input.cursor_col);

    let Some(mention) = app.mention.as_mut() else { return };
    let keep_open = match detection {
        Some((trigger_row, trigger_col, query)) => {
            mention.source = TriggerSource::Typed;
            mention.trigger_row = trigger_row;
            mention.trigger_col = trigger_col;
            if query != mention.query {
                // Every query change resets the highlight.
                mention.selected = 0;
                mention.scroll_offset = 0;
            }
            mention.candidates = filter_books(&query);
            mention.query = query;
            if mention.candidates.is_empty() {
                mention.selected = 0;
                mention.scroll_offset = 0;
            } else {
                mention.selected = mention.selected.min(mention.candidates.len() - 1);
                clamp_scroll(mention);
            }
            true
        }
        None if matches!(mention.source, TriggerSource::Button) => {
            if !mention.query.is_empty() {
                mention.query.clear();
                mention.candidates = filter_books("");
                mention.selected = 0;
                mention.scroll_offset = 0;
            }
            true
        }
        None => false,
    };
    if !keep_open {
        app.mention = None;
    }
}

pub fn deactivate(app: &mut App) {
    app.mention = None;
}

/// Move the highlight up by one, clamped (no wraparound).
pub fn move_up(app: &mut App) {
    if let Some(mention) = &mut app.mention {
        if mention.candidates.is_empty() {
            return;
        }
        mention.selected = mention.selected.saturating_sub(1);
        clamp_scroll(mention);
    }
}

/// Move the highlight down by one, clamped (no wraparound).
pub fn move_down(app: &mut App) {
    if let Some(mention) = &mut app.mention {
        if mention.candidates.is_empty() {
            return;
        }
        mention.selected = (mention.selected + 1).min(mention.candidates.len() - 1);
        clamp_scroll(mention);
    }
}

/// Select a candidate under the pointer, then commit it.
pub fn click_candidate(app: &mut App, index: usize) {
    if let Some(mention) = &mut app.mention {
        if index >= mention.candidates.len() {
            return;
        }
        mention.selected = index;
    }
    confirm_selection(app);
}

/// Commit the highlighted book: splice `name + ' '` over the `@query`
/// span (typed) or at the caret (button), then place the caret right
/// after the space. An already-present following space is reused instead
/// of doubled.
pub fn confirm_selection(app: &mut App) {
    let Some(mention) = app.mention.take() else {
        return;
    };
    let Some(book) = mention.candidates.get(mention.selected).copied() else {
        // Nothing to commit; keep the popup open (it shows "no results").
        app.mention = Some(mention);
        return;
    };

    let (row, start, end) = match mention.source {
        TriggerSource::Typed => {
            let end = mention.trigger_col + 1 + mention.query.chars().count();
            (mention.trigger_row, mention.trigger_col, end)
        }
        TriggerSource::Button => {
            (app.input.cursor_row, app.input.cursor_col, app.input.cursor_col)
        }
    };

    let Some(line) = app.input.lines.get(row) else { return };
    let chars: Vec<char> = line.chars().collect();
    let start = start.min(chars.len());
    let end = end.min(chars.len());

    let before: String = chars[..start].iter().collect();
    let after: String = chars[end..].iter().collect();
    let new_line = if after.starts_with(' ') {
        format!("{before}{}{after}", book.name)
    } else {
        format!("{before}{} {after}", book.name)
    };

    app.input.lines[row] = new_line;
    app.input.cursor_row = row;
    app.input.cursor_col = start + book.name.chars().count() + 1;
}

/// Keep `selected` visible inside the `MAX_VISIBLE` window.
fn clamp_scroll(mention: &mut MentionState) {
    if mention.selected < mention.scroll_offset {
        mention.scroll_offset = mention.selected;
    } else if mention.selected >= mention.scroll_offset + MAX_VISIBLE {
        mention.scroll_offset = mention.selected + 1 - MAX_VISIBLE;
    }
}
