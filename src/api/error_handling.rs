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

/// Shown when the backend reports an overloaded / 503 condition.
pub const OVERLOADED_MESSAGE: &str =
    "죄송합니다. 현재 서비스가 일시적으로 과부하 상태입니다. 잠시 후 다시 시도해주세요.";

/// Default retry text, same wording the service uses elsewhere.
pub const GENERIC_RETRY_MESSAGE: &str = "죄송합니다. 오류가 발생했습니다. 다시 시도해주세요.";

/// The backend's own user-facing failure detail starts with this; such a
/// message is already presentable and passes through verbatim.
const BACKEND_FAILURE_PREFIX: &str = "처리 중 오류가 발생했습니다";

/// Map the payload of a terminal `error` event to the text shown in the
/// transcript. Unknown payloads collapse to the generic retry message so
/// raw backend internals never reach the user.
pub fn user_facing_stream_error(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return GENERIC_RETRY_MESSAGE.to_owned();
    };
    if looks_like_overload(raw) {
        OVERLOADED_MESSAGE.to_owned()
    } else if raw.contains(BACKEND_FAILURE_PREFIX) {
        raw.to_owned()
    } else {
        GENERIC_RETRY_MESSAGE.to_owned()
    }
}

fn looks_like_overload(raw: &str) -> bool {
    if raw.contains("과부하") {
        return true;
    }
    let lower = raw.to_ascii_lowercase();
    ["overloaded", "overload", "503", "service unavailable"]
        .iter()
        .any(|needle| lower.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::{
        GENERIC_RETRY_MESSAGE, OVERLOADED_MESSAGE, user_facing_stream_error,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn overload_markers_map_to_overloaded_message() {
        assert_eq!(
            user_facing_stream_error(Some("anthropic overloaded_error")),
            OVERLOADED_MESSAGE
        );
        assert_eq!(user_facing_stream_error(Some("HTTP 503")), OVERLOADED_MESSAGE);
        assert_eq!(
            user_facing_stream_error(Some("Service Unavailable")),
            OVERLOADED_MESSAGE
        );
    }

    #[test]
    fn backend_failure_detail_passes_through_verbatim() {
        let detail = "처리 중 오류가 발생했습니다: embedding lookup failed";
        assert_eq!(user_facing_stream_error(Some(detail)), detail);
    }

    #[test]
    fn anything_else_collapses_to_generic_retry() {
        assert_eq!(
            user_facing_stream_error(Some("KeyError: 'documents'")),
            GENERIC_RETRY_MESSAGE
        );
        assert_eq!(user_facing_stream_error(None), GENERIC_RETRY_MESSAGE);
    }
}
