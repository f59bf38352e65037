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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Invalid API base URL: {url}")]
    InvalidApiUrl { url: String },
    #[error("HTTP client initialization failed")]
    HttpClientInit,
}

impl AppError {
    pub const INVALID_API_URL_EXIT_CODE: i32 = 20;
    pub const HTTP_CLIENT_INIT_EXIT_CODE: i32 = 21;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidApiUrl { .. } => Self::INVALID_API_URL_EXIT_CODE,
            Self::HttpClientInit => Self::HTTP_CLIENT_INIT_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidApiUrl { url } => {
                format!("Invalid API base URL `{url}`. Expected http:// or https://.")
            }
            Self::HttpClientInit => {
                "Failed to initialize the HTTP client (TLS backend unavailable?).".to_owned()
            }
        }
    }
}
