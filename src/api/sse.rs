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

use crate::api::types::Source;
use serde::{Deserialize, Serialize};

/// One decoded event from the chat stream.
///
/// The backend sends no SSE `event:` field; the `type` discriminator inside
/// the JSON payload is the only dispatch key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Turn opened; may carry a freshly assigned conversation id.
    Start {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        conversation_id: Option<String>,
    },
    /// Incremental answer fragment.
    Token {
        #[serde(default)]
        content: String,
    },
    /// Terminal success, optionally with scripture citations.
    Done {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sources: Option<Vec<Source>>,
    },
    /// Terminal failure reported by the backend.
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
}

const DATA_PREFIX: &str = "data: ";

/// Reassembles `data: <json>` frames from arbitrarily chunked stream bytes.
///
/// Frames are newline-delimited and may arrive split across network reads;
/// a frame is only parsed once its full line has been buffered. A non-empty
/// trailing frame left over when the transport completes must be flushed
/// through [`SseFrameDecoder::finish`].
#[derive(Debug, Default)]
pub struct SseFrameDecoder {
    buffer: Vec<u8>,
}

impl SseFrameDecoder {
    /// Buffer one transport chunk and return every event completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(event) = parse_frame(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Flush the trailing partial frame after the transport has completed.
    pub fn finish(&mut self) -> Option<StreamEvent> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.buffer);
        parse_frame(&line)
    }
}

/// Parse a single frame. Blank lines only separate frames; lines without
/// the `data: ` prefix and unparsable payloads are skipped (with a log)
/// so a single bad frame cannot poison the rest of the stream.
fn parse_frame(raw: &[u8]) -> Option<StreamEvent> {
    let line = String::from_utf8_lossy(raw);
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        tracing::debug!("ignoring non-data stream line: {line}");
        return None;
    };
    match serde_json::from_str::<StreamEvent>(payload) {
        Ok(event) => Some(event),
        Err(err) => {
            tracing::warn!("skipping malformed stream frame: {err} ({payload})");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SseFrameDecoder, StreamEvent};
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_whole_frames() {
        let mut decoder = SseFrameDecoder::default();
        let events = decoder.feed(
            "data: {\"type\": \"start\", \"conversation_id\": \"c-1\"}\n\ndata: {\"type\": \"token\", \"content\": \"태초에\"}\n"
                .as_bytes(),
        );
        assert_eq!(
            events,
            vec![
                StreamEvent::Start { conversation_id: Some("c-1".to_owned()) },
                StreamEvent::Token { content: "태초에".to_owned() },
            ]
        );
    }

    /// Splitting a valid frame across two arbitrary chunks yields the same
    /// event as delivering it whole.
    #[test]
    fn reassembles_split_frames() {
        let frame = b"data: {\"type\": \"token\", \"content\": \"hanaui mal\"}\n";
        for cut in 1..frame.len() - 1 {
            let mut decoder = SseFrameDecoder::default();
            assert_eq!(decoder.feed(&frame[..cut]), vec![], "cut at {cut}");
            let events = decoder.feed(&frame[cut..]);
            assert_eq!(
                events,
                vec![StreamEvent::Token { content: "hanaui mal".to_owned() }],
                "cut at {cut}"
            );
        }
    }

    #[test]
    fn finish_flushes_trailing_partial_frame() {
        let mut decoder = SseFrameDecoder::default();
        assert!(decoder.feed(b"data: {\"type\": \"done\"}").is_empty());
        assert_eq!(decoder.finish(), Some(StreamEvent::Done { sources: None }));
        // a second flush is a no-op
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn malformed_frame_is_skipped_without_poisoning_the_stream() {
        let mut decoder = SseFrameDecoder::default();
        let events = decoder.feed(
            b"data: {oops not json\ndata: {\"type\": \"token\", \"content\": \"ok\"}\n",
        );
        assert_eq!(events, vec![StreamEvent::Token { content: "ok".to_owned() }]);
    }

    #[test]
    fn blank_and_non_data_lines_are_ignored() {
        let mut decoder = SseFrameDecoder::default();
        let events = decoder.feed(b"\n\n: keepalive\nretry: 500\n\n");
        assert_eq!(events, vec![]);
    }

    #[test]
    fn done_event_carries_sources() {
        let mut decoder = SseFrameDecoder::default();
        let frame = r#"data: {"type": "done", "sources": [{"book": "창세기", "chapter": "1", "verse": "1", "content": "태초에 하나님이 천지를 창조하시니라"}]}
"#;
        let events = decoder.feed(frame.as_bytes());
        let StreamEvent::Done { sources: Some(sources) } = &events[0] else {
            panic!("expected done with sources, got {events:?}");
        };
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].book, "창세기");
        assert_eq!(sources[0].verse, "1");
    }

    #[test]
    fn error_event_content_is_optional() {
        let mut decoder = SseFrameDecoder::default();
        let events = decoder.feed(b"data: {\"type\": \"error\"}\n");
        assert_eq!(events, vec![StreamEvent::Error { content: None }]);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let mut decoder = SseFrameDecoder::default();
        let events = decoder.feed(b"data: {\"type\": \"token\", \"content\": \"a\"}\r\n");
        assert_eq!(events, vec![StreamEvent::Token { content: "a".to_owned() }]);
    }

    #[test]
    fn unknown_extra_fields_are_tolerated() {
        let mut decoder = SseFrameDecoder::default();
        let events =
            decoder.feed(b"data: {\"type\": \"token\", \"content\": \"x\", \"index\": 3}\n");
        assert_eq!(events, vec![StreamEvent::Token { content: "x".to_owned() }]);
    }
}
