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

use super::ChatSession;
use crate::graph::{GraphError, HumanMessage, Message, MessageContent};

impl ChatSession {
    /// Send user input and drive the resulting run to completion.
    ///
    /// Blank input, or a send issued while another send or reconnect is in
    /// flight, is a no-op. The user message is appended optimistically and
    /// stays in place even if the run fails, so the user can resend.
    pub async fn send(&mut self, input: &str) {
        let input = input.trim();
        if input.is_empty() || self.loading {
            return;
        }

        self.loading = true;
        self.error = None;
        self.reset_cancel_flag();
        self.messages.push(Message::Human(HumanMessage {
            id: uuid::Uuid::new_v4().to_string(),
            content: MessageContent::Text(input.to_owned()),
            name: None,
        }));

        let result = match self.client.open_run(&self.thread_id, &self.assistant_id, input).await {
            Ok(events) => self.consume_stream(events).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {}
            Err(GraphError::Cancelled) => {
                // A user-initiated abort is a successful action, not a failure.
                tracing::debug!(thread_id = %self.thread_id, "run cancelled by user");
            }
            Err(err) => {
                tracing::warn!(thread_id = %self.thread_id, "send failed: {err}");
                self.error = Some(err.to_string());
            }
        }

        self.finish_run();
    }
}
