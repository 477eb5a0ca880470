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

use crate::graph::{GraphApi, Message};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One conversation view's synchronization state against a remote thread.
///
/// Owned exclusively by its view; nothing is shared across sessions. The run
/// identifier and cancel flag are behind shared handles so a [`Canceller`]
/// obtained from this session can act while a send or reconnect is awaiting
/// network events.
///
/// [`Canceller`]: crate::session::Canceller
pub struct ChatSession {
    pub(super) client: Rc<dyn GraphApi>,
    pub(super) thread_id: String,
    pub(super) assistant_id: String,
    /// Ordered timeline. Append-order, except in-place replacement of the
    /// currently streaming message by identifier.
    pub messages: Vec<Message>,
    /// Advisory guard against overlapping send/reconnect invocations.
    pub loading: bool,
    /// Human-readable failure from the last send, if any. Cancellation never
    /// populates this.
    pub error: Option<String>,
    pub(super) active_run: Rc<RefCell<Option<String>>>,
    pub(super) cancel_requested: Arc<AtomicBool>,
    /// Identifier of the message currently being streamed, if any.
    pub(super) streaming_id: Option<String>,
}

impl ChatSession {
    #[must_use]
    pub fn new(
        client: Rc<dyn GraphApi>,
        thread_id: impl Into<String>,
        assistant_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            thread_id: thread_id.into(),
            assistant_id: assistant_id.into(),
            messages: Vec::new(),
            loading: false,
            error: None,
            active_run: Rc::new(RefCell::new(None)),
            cancel_requested: Arc::new(AtomicBool::new(false)),
            streaming_id: None,
        }
    }

    /// Load persisted history, then resume an in-flight run if one exists.
    /// Call once when the conversation view mounts.
    pub async fn start(&mut self) {
        self.load_history().await;
        self.reconnect_if_needed().await;
    }

    #[must_use]
    pub fn client(&self) -> &dyn GraphApi {
        self.client.as_ref()
    }

    #[must_use]
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    #[must_use]
    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    #[must_use]
    pub fn active_run(&self) -> Option<String> {
        self.active_run.borrow().clone()
    }

    /// Whether a message is currently being streamed into the timeline.
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.streaming_id.is_some()
    }

    pub(super) fn set_active_run(&self, run_id: Option<String>) {
        *self.active_run.borrow_mut() = run_id;
    }

    pub(super) fn reset_cancel_flag(&self) {
        self.cancel_requested.store(false, Ordering::Release);
    }

    pub(super) fn cancel_was_requested(&self) -> bool {
        self.cancel_requested.load(Ordering::Acquire)
    }

    /// Common teardown shared by the send and reconnect exit paths.
    pub(super) fn finish_run(&mut self) {
        self.loading = false;
        self.set_active_run(None);
        self.streaming_id = None;
    }
}
