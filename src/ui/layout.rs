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

use ratatui::layout::Rect;

/// Sidebar column width when the terminal is wide enough to show it.
pub const SIDEBAR_WIDTH: u16 = 34;

/// Terminals narrower than this drop the sidebar entirely.
const SIDEBAR_MIN_FRAME_WIDTH: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub sidebar: Rect,
    pub header: Rect,
    pub header_sep: Rect,
    pub chat: Rect,
    pub input_sep: Rect,
    pub input: Rect,
    pub footer: Rect,
}

/// Fixed rows: header(1) + header sep(1) + input sep(1) + footer(1).
const FIXED_ROWS: u16 = 4;

pub fn compute(frame: Rect, input_height: u16) -> Areas {
    let sidebar_width = if frame.width >= SIDEBAR_MIN_FRAME_WIDTH { SIDEBAR_WIDTH } else { 0 };
    let sidebar = Rect { width: sidebar_width, ..frame };
    let main = Rect {
        x: frame.x + sidebar_width,
        width: frame.width.saturating_sub(sidebar_width),
        ..frame
    };

    let input_height = input_height.clamp(1, 4).min(main.height);
    let chat_height = main.height.saturating_sub(FIXED_ROWS + input_height);

    let mut y = main.y;
    let mut take = |height: u16| {
        let area = Rect { x: main.x, y, width: main.width, height };
        y = y.saturating_add(height);
        area
    };

    Areas {
        sidebar,
        header: take(1),
        header_sep: take(1),
        chat: take(chat_height),
        input_sep: take(1),
        input: take(input_height),
        footer: take(1),
    }
}

#[cfg(test)]
mod tests {
    use super::{SIDEBAR_WIDTH, compute};
    use pretty_assertions::assert_eq;
    use ratatui::layout::Rect;

    #[test]
    fn wide_frame_reserves_the_sidebar() {
        let areas = compute(Rect::new(0, 0, 120, 40), 1);
        assert_eq!(areas.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(areas.header.x, SIDEBAR_WIDTH);
        assert_eq!(areas.header.width, 120 - SIDEBAR_WIDTH);
    }

    #[test]
    fn narrow_frame_drops_the_sidebar() {
        let areas = compute(Rect::new(0, 0, 60, 20), 1);
        assert_eq!(areas.sidebar.width, 0);
        assert_eq!(areas.chat.width, 60);
    }

    #[test]
    fn rows_partition_the_frame_height() {
        let frame = Rect::new(0, 0, 100, 30);
        let areas = compute(frame, 2);
        let total = areas.header.height
            + areas.header_sep.height
            + areas.chat.height
            + areas.input_sep.height
            + areas.input.height
            + areas.footer.height;
        assert_eq!(total, 30);
        assert_eq!(areas.footer.y, 29);
    }

    #[test]
    fn input_height_is_clamped_to_four_rows() {
        let areas = compute(Rect::new(0, 0, 100, 30), 9);
        assert_eq!(areas.input.height, 4);
    }

    #[test]
    fn tiny_frames_do_not_underflow() {
        let areas = compute(Rect::new(0, 0, 10, 2), 1);
        assert_eq!(areas.chat.height, 0);
    }
}
