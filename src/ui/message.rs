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

use crate::app::transcript::{ChatMessage, MessageRole, MessageStatus};
use crate::ui::theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Render one transcript message into owned lines.
pub fn build_lines(
    message: &ChatMessage,
    show_sources: bool,
    spinner_frame: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.push(header_line(message));

    match message.status {
        MessageStatus::Pending => {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", theme::spinner(spinner_frame)),
                    Style::default().fg(theme::SCRIPTURE_GOLD),
                ),
                Span::styled("생성 중...", Style::default().fg(theme::DIM)),
            ]));
        }
        MessageStatus::Errored => {
            for raw in message.text.split('\n') {
                lines.push(Line::from(Span::styled(
                    raw.to_owned(),
                    Style::default().fg(theme::STATUS_ERROR),
                )));
            }
        }
        MessageStatus::Streaming | MessageStatus::Complete => match message.role {
            MessageRole::User => {
                for raw in message.text.split('\n') {
                    lines.push(Line::from(Span::raw(raw.to_owned())));
                }
            }
            MessageRole::Assistant => lines.extend(markdown_lines(&message.text)),
        },
    }

    if !message.sources.is_empty() {
        lines.push(sources_summary_line(message.sources.len(), show_sources));
        if show_sources {
            for source in &message.sources {
                lines.push(Line::from(Span::styled(
                    format!("  » {} {}:{}", source.book, source.chapter, source.verse),
                    Style::default().fg(theme::SCRIPTURE_GOLD).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    format!("    {}", source.content),
                    Style::default().fg(theme::DIM),
                )));
            }
        }
    }

    lines.push(Line::default());
    lines
}

fn header_line(message: &ChatMessage) -> Line<'static> {
    let (label, color) = match message.role {
        MessageRole::User => ("나", theme::ROLE_USER),
        MessageRole::Assistant => ("성경QA", theme::ROLE_ASSISTANT),
    };
    Line::from(Span::styled(
        label.to_owned(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn sources_summary_line(count: usize, expanded: bool) -> Line<'static> {
    let marker = if expanded { "▾" } else { "▸" };
    Line::from(vec![
        Span::styled(
            format!("{marker} 참고 구절 {count}개"),
            Style::default().fg(theme::DIM),
        ),
        Span::styled(
            " · 개역한글(1961), 대한성서공회 · Ctrl+O",
            Style::default().fg(theme::DIM),
        ),
    ])
}

/// Assistant answers are markdown; convert the rendered text into owned
/// lines so they can outlive the source string. tui-markdown has panicked
/// on exotic input before, so fall back to plain text instead of taking
/// the whole frame down.
fn markdown_lines(text: &str) -> Vec<Line<'static>> {
    let rendered =
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| render_markdown(text)));
    match rendered {
        Ok(lines) => lines,
        Err(_) => {
            tracing::warn!("tui-markdown panic; falling back to plain-text rendering");
            text.split('\n').map(|line| Line::from(Span::raw(line.to_owned()))).collect()
        }
    }
}

fn render_markdown(text: &str) -> Vec<Line<'static>> {
    tui_markdown::from_str(text)
        .lines
        .into_iter()
        .map(|line| {
            let spans: Vec<Span<'static>> = line
                .spans
                .into_iter()
                .map(|span| Span::styled(span.content.into_owned(), span.style))
                .collect();
            Line::from(spans).style(line.style)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::build_lines;
    use crate::api::types::Source;
    use crate::app::transcript::{ChatMessage, MessageRole, MessageStatus};

    fn answer_with_sources() -> ChatMessage {
        ChatMessage {
            id: "1".to_owned(),
            role: MessageRole::Assistant,
            text: "태초에 **하나님이** 천지를 창조하시니라".to_owned(),
            status: MessageStatus::Complete,
            created_at_ms: 0,
            sources: vec![Source {
                book: "창세기".to_owned(),
                chapter: "1".to_owned(),
                verse: "1".to_owned(),
                content: "태초에 하나님이 천지를 창조하시니라".to_owned(),
            }],
        }
    }

    #[test]
    fn collapsed_sources_show_only_the_summary() {
        let lines = build_lines(&answer_with_sources(), false, 0);
        let text: String =
            lines.iter().map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
                .collect::<Vec<_>>()
                .join("\n");
        assert!(text.contains("참고 구절 1개"));
        assert!(!text.contains("창세기 1:1"));
    }

    #[test]
    fn expanded_sources_show_book_chapter_verse() {
        let lines = build_lines(&answer_with_sources(), true, 0);
        let text: String =
            lines.iter().map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
                .collect::<Vec<_>>()
                .join("\n");
        assert!(text.contains("창세기 1:1"));
        assert!(text.contains("태초에 하나님이 천지를 창조하시니라"));
    }

    #[test]
    fn pending_message_shows_the_loader() {
        let message = ChatMessage {
            id: "2".to_owned(),
            role: MessageRole::Assistant,
            text: String::new(),
            status: MessageStatus::Pending,
            created_at_ms: 0,
            sources: Vec::new(),
        };
        let lines = build_lines(&message, false, 3);
        let text: String = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("생성 중..."));
    }
}
