// agentput — a native Rust terminal client for LangGraph chat agents
// Copyright (C) 2026  The agentput authors
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

pub mod config;
pub mod error;
pub mod graph;
pub mod session;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "agentput", about = "Terminal client for LangGraph chat agents")]
pub struct Cli {
    /// Backend API address (overrides the saved configuration)
    #[arg(long, short)]
    pub url: Option<String>,

    /// Assistant identifier (defaults to the saved selection)
    #[arg(long, short)]
    pub assistant: Option<String>,

    /// Thread to use: an existing ID, or "new" to force a fresh conversation
    /// (default: the assistant's most recent thread)
    #[arg(long)]
    pub thread: Option<String>,

    /// Remember the resolved address and assistant for future runs
    #[arg(long)]
    pub save: bool,

    /// Write diagnostics to this file (tracing is disabled without it)
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives (falls back to RUST_LOG, then "info")
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}
