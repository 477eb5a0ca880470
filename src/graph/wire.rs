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

use crate::graph::sse::SseFrame;
use crate::graph::types::Message;
use serde::Deserialize;

/// One unit of a run's live output feed.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Carries the run identifier for the stream being consumed.
    Metadata { run_id: String },
    /// Message fragments whose content is the cumulative text so far for
    /// that message, not a delta.
    MessagesPartial(Vec<Message>),
    /// Authoritative full message list for the thread at this point.
    Values { messages: Vec<Message> },
}

#[derive(Debug, Deserialize)]
struct MetadataPayload {
    run_id: String,
}

#[derive(Debug, Deserialize)]
struct ValuesPayload {
    #[serde(default)]
    messages: Vec<serde_json::Value>,
}

/// Map a wire frame to a stream event. Unknown event names and malformed
/// payloads decode to `None`; the consumer treats them as noise.
#[must_use]
pub fn decode_frame(frame: &SseFrame) -> Option<StreamEvent> {
    match frame.event.as_deref()? {
        "metadata" => {
            let payload: MetadataPayload = decode_data(&frame.data)?;
            Some(StreamEvent::Metadata { run_id: payload.run_id })
        }
        "messages/partial" => {
            let raw: Vec<serde_json::Value> = decode_data(&frame.data)?;
            let chunks = Message::decode_list(&raw);
            (!chunks.is_empty()).then_some(StreamEvent::MessagesPartial(chunks))
        }
        "values" => {
            let payload: ValuesPayload = decode_data(&frame.data)?;
            Some(StreamEvent::Values { messages: Message::decode_list(&payload.messages) })
        }
        other => {
            tracing::trace!("ignoring stream event {other:?}");
            None
        }
    }
}

fn decode_data<T: serde::de::DeserializeOwned>(data: &str) -> Option<T> {
    match serde_json::from_str(data) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!("malformed stream event payload: {err}");
            None
        }
    }
}
