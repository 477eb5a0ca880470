// Listing and ordering of the persisted-conversation directory.

use crate::helpers::FakeGraph;
use agentput_client::graph::Thread;
use agentput_client::session::threads;
use pretty_assertions::assert_eq;

fn thread(thread_id: &str, created_at: &str) -> Thread {
    serde_json::from_value(serde_json::json!({
        "thread_id": thread_id,
        "created_at": created_at,
    }))
    .expect("valid thread")
}

#[tokio::test]
async fn threads_are_listed_newest_first() {
    let graph = FakeGraph::default();
    *graph.threads.borrow_mut() = vec![
        thread("t-old", "2026-08-01T09:00:00Z"),
        thread("t-new", "2026-08-20T09:00:00Z"),
        thread("t-mid", "2026-08-10T09:00:00Z"),
    ];

    let listed = threads::list_threads(&graph, Some("assistant-1")).await.expect("list");

    let ids: Vec<&str> = listed.iter().map(|t| t.thread_id.as_str()).collect();
    assert_eq!(ids, ["t-new", "t-mid", "t-old"]);
}

#[tokio::test]
async fn most_recent_thread_picks_the_top_of_the_directory() {
    let graph = FakeGraph::default();
    *graph.threads.borrow_mut() =
        vec![thread("t-old", "2026-08-01T09:00:00Z"), thread("t-new", "2026-08-20T09:00:00Z")];

    let recent = threads::most_recent_thread(&graph, None).await.expect("search");

    assert_eq!(recent.expect("a thread").thread_id, "t-new");
}

#[tokio::test]
async fn empty_directory_yields_no_recent_thread() {
    let graph = FakeGraph::default();
    let recent = threads::most_recent_thread(&graph, None).await.expect("search");
    assert_eq!(recent, None);
}
