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

//! Pure decoding of already-fetched messages into render-ready variants.
//!
//! Nothing here touches session state; decoding failures degrade to the
//! generic shape (or to "nothing decoded") instead of raising.

use crate::graph::{Message, Todo, ToolCall, ToolMessage};

const PLAN_TOOLS: [&str; 2] = ["write_todos", "read_todos"];
const TASK_TOOL: &str = "task";
const PLAN_RESULT_PREFIX: &str = "Updated todo list to ";

/// What a tool call means for presentation, decoded once and matched
/// exhaustively at render time.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCallKind<'a> {
    /// A plan update from the `write_todos`/`read_todos` tools.
    PlanUpdate(Vec<Todo>),
    /// A sub-task delegated to another agent via the `task` tool.
    Delegation { agent_type: String, description: String },
    /// Anything else: shown by name with its raw arguments.
    Generic(&'a ToolCall),
}

#[must_use]
pub fn classify_tool_call(call: &ToolCall) -> ToolCallKind<'_> {
    if PLAN_TOOLS.contains(&call.name.as_str()) {
        // An undecodable plan degrades to the generic rendering.
        return match todos_from_args(call) {
            Some(todos) => ToolCallKind::PlanUpdate(todos),
            None => ToolCallKind::Generic(call),
        };
    }
    if call.name == TASK_TOOL {
        return ToolCallKind::Delegation {
            agent_type: string_arg(call, "subagent_type").unwrap_or_else(|| "unknown".to_owned()),
            description: string_arg(call, "description").unwrap_or_default(),
        };
    }
    ToolCallKind::Generic(call)
}

fn todos_from_args(call: &ToolCall) -> Option<Vec<Todo>> {
    let todos = call.args.get("todos")?;
    serde_json::from_value(todos.clone()).ok()
}

fn string_arg(call: &ToolCall, key: &str) -> Option<String> {
    call.args.get(key).and_then(|v| v.as_str()).map(ToOwned::to_owned)
}

/// Decode a plan update from a tool *result* message. The backend embeds a
/// JSON-ish list inside natural-language content, with single-quoted
/// literals; decoding failure yields `None`.
#[must_use]
pub fn plan_update_from_result(message: &ToolMessage) -> Option<Vec<Todo>> {
    if !message.name.as_deref().is_some_and(|name| PLAN_TOOLS.contains(&name)) {
        return None;
    }
    let text = message.content.as_text();
    let rest = text.split(PLAN_RESULT_PREFIX).nth(1)?;
    let start = rest.find('[')?;
    let end = rest.rfind(']')?;
    if end < start {
        return None;
    }
    let literal = &rest[start..=end];
    serde_json::from_str(literal)
        .ok()
        .or_else(|| serde_json::from_str(&literal.replace('\'', "\"")).ok())
}

/// Find the result message answering `call`. Matches by `tool_call_id`
/// first; falls back to the tool name because the backend omits the call id
/// on delegation (`task`) results.
#[must_use]
pub fn find_tool_result<'a>(messages: &'a [Message], call: &ToolCall) -> Option<&'a ToolMessage> {
    messages
        .iter()
        .filter_map(Message::as_tool)
        .find(|m| m.tool_call_id.as_deref() == Some(call.id.as_str()))
        .or_else(|| {
            messages
                .iter()
                .filter_map(Message::as_tool)
                .find(|m| m.tool_call_id.is_none() && m.name.as_deref() == Some(call.name.as_str()))
        })
}

/// Raw textual result of a delegated sub-task, if this message carries one.
#[must_use]
pub fn delegation_result(message: &ToolMessage) -> Option<String> {
    (message.name.as_deref() == Some(TASK_TOOL)).then(|| message.content.as_text())
}

/// A message with no content and no tool calls has nothing to show.
#[must_use]
pub fn has_renderable_content(message: &Message) -> bool {
    match message {
        Message::Ai(m) => !m.content.is_empty() || !m.tool_calls.is_empty(),
        Message::Human(m) => !m.content.is_empty(),
        Message::Tool(m) => !m.content.is_empty(),
    }
}
