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

//! Thread directory: listing persisted conversations and deriving display
//! titles from their snapshots.

use crate::graph::{GraphApi, GraphError, Message, Thread};

const TITLE_MAX_CHARS: usize = 30;
const FALLBACK_TITLE: &str = "New conversation";
const SEARCH_LIMIT: usize = 50;

/// List persisted threads for `assistant_id`, most recent first.
pub async fn list_threads(
    client: &dyn GraphApi,
    assistant_id: Option<&str>,
) -> Result<Vec<Thread>, GraphError> {
    let mut threads = client.search_threads(assistant_id, SEARCH_LIMIT).await?;
    threads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(threads)
}

/// The most recently created thread, if any exist.
pub async fn most_recent_thread(
    client: &dyn GraphApi,
    assistant_id: Option<&str>,
) -> Result<Option<Thread>, GraphError> {
    Ok(list_threads(client, assistant_id).await?.into_iter().next())
}

/// Display title for a thread: the first human message's text, truncated.
#[must_use]
pub fn thread_title(thread: &Thread) -> String {
    let Some(values) = &thread.values else {
        return FALLBACK_TITLE.to_owned();
    };
    values
        .decode_messages()
        .iter()
        .find_map(|message| match message {
            Message::Human(m) => {
                let text = m.content.as_text();
                let text = text.trim();
                (!text.is_empty()).then(|| truncate(text))
            }
            _ => None,
        })
        .unwrap_or_else(|| FALLBACK_TITLE.to_owned())
}

/// Number of decodable messages in a thread's snapshot.
#[must_use]
pub fn message_count(thread: &Thread) -> usize {
    thread.values.as_ref().map_or(0, |values| values.decode_messages().len())
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= TITLE_MAX_CHARS {
        return text.to_owned();
    }
    let head: String = text.chars().take(TITLE_MAX_CHARS).collect();
    format!("{}...", head.trim_end())
}
