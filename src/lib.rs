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

pub mod api;
pub mod app;
pub mod error;
pub mod ui;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bible-qa", about = "Native Rust terminal for the 성경QA Bible assistant")]
pub struct Cli {
    /// Backend base URL (e.g. http://localhost:8000)
    #[arg(long, env = "BIBLE_QA_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    /// Use the non-streaming chat endpoint instead of SSE
    #[arg(long)]
    pub no_stream: bool,

    /// Write tracing diagnostics to this file (tracing stays off without it)
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives (falls back to RUST_LOG, then "info")
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}
