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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("backend address not configured")]
    NotConfigured,
    #[error("backend unreachable")]
    BackendUnreachable,
    #[error("no assistant available")]
    NoAssistant,
}

impl AppError {
    pub const NOT_CONFIGURED_EXIT_CODE: i32 = 20;
    pub const BACKEND_UNREACHABLE_EXIT_CODE: i32 = 21;
    pub const NO_ASSISTANT_EXIT_CODE: i32 = 22;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotConfigured => Self::NOT_CONFIGURED_EXIT_CODE,
            Self::BackendUnreachable => Self::BACKEND_UNREACHABLE_EXIT_CODE,
            Self::NoAssistant => Self::NO_ASSISTANT_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotConfigured => {
                "No backend address configured. Pass --url <ADDRESS> (add --save to remember it)."
            }
            Self::BackendUnreachable => {
                "Could not reach the LangGraph backend. Check the address and that the server is running."
            }
            Self::NoAssistant => {
                "The backend advertises no assistants. Register a graph on the server, or pass --assistant <ID>."
            }
        }
    }
}
