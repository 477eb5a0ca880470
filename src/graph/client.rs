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

use crate::graph::error::GraphError;
use crate::graph::sse::SseStreamParser;
use crate::graph::types::{Assistant, Run, Thread, ThreadState};
use crate::graph::wire::{self, StreamEvent};
use async_trait::async_trait;
use futures::StreamExt as _;
use futures::stream::LocalBoxStream;

/// Live event feed for one run, already decoded from the wire.
pub type EventStream = LocalBoxStream<'static, Result<StreamEvent, GraphError>>;

/// The remote operations the session core consumes. Transport-agnostic so
/// tests can substitute a scripted backend.
#[async_trait(?Send)]
pub trait GraphApi {
    async fn create_thread(
        &self,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Thread, GraphError>;

    async fn thread_state(&self, thread_id: &str) -> Result<ThreadState, GraphError>;

    async fn search_threads(
        &self,
        assistant_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Thread>, GraphError>;

    async fn delete_thread(&self, thread_id: &str) -> Result<(), GraphError>;

    /// Most recent run for a thread, if any.
    async fn latest_run(&self, thread_id: &str) -> Result<Option<Run>, GraphError>;

    /// Open a new run for `input` and stream its events. Requests both
    /// `messages` (incremental fragments) and `values` (authoritative
    /// snapshots) stream modes.
    async fn open_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        input: &str,
    ) -> Result<EventStream, GraphError>;

    /// Re-attach to an already-started run's live stream.
    async fn join_run(&self, thread_id: &str, run_id: &str) -> Result<EventStream, GraphError>;

    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<(), GraphError>;

    async fn search_assistants(&self, limit: usize) -> Result<Vec<Assistant>, GraphError>;
}

/// HTTP client for a LangGraph API server.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: String,
}

impl GraphClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GraphError> {
        let http = reqwest::Client::builder().build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Cheap reachability probe: an assistant search with limit 1.
    pub async fn ping(&self) -> bool {
        match self.search_assistants(1).await {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!("backend ping failed: {err}");
                false
            }
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GraphError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.trim().is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_owned());
        Err(GraphError::Status { status, message })
    }

    /// Turn a streaming response body into decoded events. SSE frames may
    /// span chunk boundaries; the parser carries the remainder.
    fn event_stream(response: reqwest::Response) -> EventStream {
        let mut parser = SseStreamParser::default();
        response
            .bytes_stream()
            .map(move |chunk| match chunk {
                Ok(bytes) => {
                    let events: Vec<Result<StreamEvent, GraphError>> = parser
                        .feed(&bytes)
                        .iter()
                        .filter_map(wire::decode_frame)
                        .map(Ok)
                        .collect();
                    futures::stream::iter(events)
                }
                Err(err) => futures::stream::iter(vec![Err(GraphError::from(err))]),
            })
            .flatten()
            .boxed_local()
    }
}

#[async_trait(?Send)]
impl GraphApi for GraphClient {
    async fn create_thread(
        &self,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Thread, GraphError> {
        let response = self
            .http
            .post(self.url("/threads"))
            .json(&serde_json::json!({ "metadata": metadata }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn thread_state(&self, thread_id: &str) -> Result<ThreadState, GraphError> {
        let response = self.http.get(self.url(&format!("/threads/{thread_id}/state"))).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn search_threads(
        &self,
        assistant_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Thread>, GraphError> {
        let mut body = serde_json::json!({ "limit": limit });
        if let Some(assistant_id) = assistant_id {
            body["metadata"] = serde_json::json!({ "assistant_id": assistant_id });
        }
        let response = self.http.post(self.url("/threads/search")).json(&body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<(), GraphError> {
        let response = self.http.delete(self.url(&format!("/threads/{thread_id}"))).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn latest_run(&self, thread_id: &str) -> Result<Option<Run>, GraphError> {
        let response = self
            .http
            .get(self.url(&format!("/threads/{thread_id}/runs")))
            .query(&[("limit", "1")])
            .send()
            .await?;
        let runs: Vec<Run> = Self::check(response).await?.json().await?;
        Ok(runs.into_iter().next())
    }

    async fn open_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        input: &str,
    ) -> Result<EventStream, GraphError> {
        let body = serde_json::json!({
            "assistant_id": assistant_id,
            "input": { "messages": [{ "role": "user", "content": input }] },
            "stream_mode": ["messages", "values"],
        });
        let response = self
            .http
            .post(self.url(&format!("/threads/{thread_id}/runs/stream")))
            .json(&body)
            .send()
            .await?;
        Ok(Self::event_stream(Self::check(response).await?))
    }

    async fn join_run(&self, thread_id: &str, run_id: &str) -> Result<EventStream, GraphError> {
        let response = self
            .http
            .get(self.url(&format!("/threads/{thread_id}/runs/{run_id}/stream")))
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?;
        Ok(Self::event_stream(Self::check(response).await?))
    }

    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<(), GraphError> {
        let response = self
            .http
            .post(self.url(&format!("/threads/{thread_id}/runs/{run_id}/cancel")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn search_assistants(&self, limit: usize) -> Result<Vec<Assistant>, GraphError> {
        let response = self
            .http
            .post(self.url("/assistants/search"))
            .json(&serde_json::json!({ "limit": limit }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

/// Backend handle with the "not yet configured" state modeled explicitly
/// instead of a global client behind a throwing accessor.
#[derive(Debug, Clone)]
pub enum Backend {
    Unconfigured,
    Connected(GraphClient),
}

impl Backend {
    pub fn from_url(url: Option<&str>) -> Result<Self, GraphError> {
        match url {
            Some(url) if !url.trim().is_empty() => Ok(Self::Connected(GraphClient::new(url)?)),
            _ => Ok(Self::Unconfigured),
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    pub fn client(&self) -> Result<&GraphClient, GraphError> {
        match self {
            Self::Connected(client) => Ok(client),
            Self::Unconfigured => Err(GraphError::NotConfigured),
        }
    }
}
