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

pub mod client;
pub mod error;
pub mod sse;
pub mod types;
pub mod wire;

pub use client::{Backend, EventStream, GraphApi, GraphClient};
pub use error::GraphError;
pub use sse::SseStreamParser;
pub use types::{
    AiMessage, Assistant, HumanMessage, Message, MessageContent, Run, RunStatus, Thread,
    ThreadState, ThreadValues, Todo, TodoStatus, ToolCall, ToolMessage, UsageMetadata,
};
pub use wire::StreamEvent;
