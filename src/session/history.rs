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

impl ChatSession {
    /// Replace the timeline with the thread's persisted snapshot.
    ///
    /// Best-effort: a fetch failure yields an empty list and is never
    /// surfaced to the user — the conversation can proceed without its
    /// history. The error field is left untouched either way.
    pub async fn load_history(&mut self) {
        match self.client.thread_state(&self.thread_id).await {
            Ok(state) => {
                self.messages = state.values.decode_messages();
                tracing::debug!(
                    thread_id = %self.thread_id,
                    count = self.messages.len(),
                    "loaded persisted history"
                );
            }
            Err(err) => {
                tracing::warn!(thread_id = %self.thread_id, "history fetch failed: {err}");
                self.messages.clear();
            }
        }
    }
}
