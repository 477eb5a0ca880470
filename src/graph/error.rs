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

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The backend handle exists but no address has been configured yet.
    #[error("backend address is not configured")]
    NotConfigured,
    #[error("request to backend failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Status { status: reqwest::StatusCode, message: String },
    #[error("failed to decode backend payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// The run's stream terminated because the user cancelled it. This is a
    /// distinct category so callers can suppress it without string matching.
    #[error("run cancelled")]
    Cancelled,
}

impl GraphError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
