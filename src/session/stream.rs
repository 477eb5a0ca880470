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
use crate::graph::{EventStream, GraphError, Message, StreamEvent};
use futures::StreamExt as _;

impl ChatSession {
    /// Fold one stream event into the session state. Shared verbatim by the
    /// send and reconnect paths; this is the system's merge algorithm.
    pub fn apply_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Metadata { run_id } => {
                self.set_active_run(Some(run_id));
            }
            StreamEvent::MessagesPartial(chunks) => {
                // Only the first fragment matters, and only for AI output.
                let Some(Message::Ai(chunk)) = chunks.into_iter().next() else {
                    return;
                };
                if self.streaming_id.is_none() {
                    self.streaming_id = Some(chunk.id.clone());
                }
                // Fragment content is cumulative, so replacement by id is
                // idempotent under duplicated or re-delivered fragments.
                match self.messages.iter_mut().find(|m| m.id() == chunk.id) {
                    Some(slot) => *slot = Message::Ai(chunk),
                    None => self.messages.push(Message::Ai(chunk)),
                }
            }
            StreamEvent::Values { messages } => {
                // Authoritative snapshot: always wins over accumulated
                // partial state for the same run.
                self.messages = messages;
                self.streaming_id = None;
            }
        }
    }

    /// Drive a run's event feed to completion, applying each event in
    /// arrival order. Returns when the server closes the stream.
    ///
    /// A transport error that arrives after the user requested cancellation
    /// is reported as [`GraphError::Cancelled`] so callers can tell an abort
    /// from a genuine failure without inspecting message text.
    pub async fn consume_stream(&mut self, mut events: EventStream) -> Result<(), GraphError> {
        while let Some(next) = events.next().await {
            match next {
                Ok(event) => self.apply_event(event),
                Err(_) if self.cancel_was_requested() => return Err(GraphError::Cancelled),
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}
