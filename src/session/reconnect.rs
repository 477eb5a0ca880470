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
    /// Re-attach to an in-flight run after a reload.
    ///
    /// Looks up the thread's most recent run; if it is still `pending` or
    /// `running`, joins its live stream and folds every event through the
    /// shared consumer until the server closes it. A missing or terminal run
    /// means there is nothing to do. Failures here are not user-facing: a
    /// stale run is cleaned up silently.
    pub async fn reconnect_if_needed(&mut self) {
        let run = match self.client.latest_run(&self.thread_id).await {
            Ok(run) => run,
            Err(err) => {
                tracing::warn!(thread_id = %self.thread_id, "run lookup failed: {err}");
                return;
            }
        };
        let Some(run) = run else {
            return;
        };
        if !run.status.is_resumable() {
            return;
        }

        tracing::info!(run_id = %run.run_id, status = ?run.status, "resuming in-flight run");
        self.loading = true;
        self.reset_cancel_flag();
        self.set_active_run(Some(run.run_id.clone()));

        let result = match self.client.join_run(&self.thread_id, &run.run_id).await {
            Ok(events) => self.consume_stream(events).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            tracing::debug!(run_id = %run.run_id, "resumed stream ended early: {err}");
        }

        self.finish_run();
    }
}
