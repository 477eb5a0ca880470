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
use crate::graph::GraphApi;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Detached cancel handle for a session's active run.
///
/// Cancellation is cooperative and remote-confirmed: this issues the remote
/// cancel request and marks the session as aborting, then relies on the
/// server to end the run's stream, after which the consuming loop exits
/// naturally. It never tears down an in-flight network read locally. Obtain
/// one before starting a send so a concurrent driver task can stop it.
#[derive(Clone)]
pub struct Canceller {
    client: Rc<dyn GraphApi>,
    thread_id: String,
    active_run: Rc<RefCell<Option<String>>>,
    cancel_requested: Arc<AtomicBool>,
}

impl Canceller {
    /// Request cancellation of the active run, if any. Clears the recorded
    /// run identifier whether or not a request went out.
    pub async fn cancel(&self) {
        let run_id = self.active_run.borrow_mut().take();
        let Some(run_id) = run_id else {
            return;
        };
        self.cancel_requested.store(true, Ordering::Release);
        if let Err(err) = self.client.cancel_run(&self.thread_id, &run_id).await {
            // The run may already be finished server-side; nothing to do.
            tracing::warn!(%run_id, "run cancel request failed: {err}");
        } else {
            tracing::info!(%run_id, "run cancelled");
        }
    }
}

impl ChatSession {
    #[must_use]
    pub fn canceller(&self) -> Canceller {
        Canceller {
            client: Rc::clone(&self.client),
            thread_id: self.thread_id.clone(),
            active_run: Rc::clone(&self.active_run),
            cancel_requested: Arc::clone(&self.cancel_requested),
        }
    }

    /// Cancel the active run and clear the loading flag. Cancelling when no
    /// run is active still clears loading and issues no network call.
    pub async fn cancel(&mut self) {
        self.canceller().cancel().await;
        self.loading = false;
    }
}
