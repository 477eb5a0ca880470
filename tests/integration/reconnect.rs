// Re-attaching to an in-flight run after a reload.

use crate::helpers::{
    FakeGraph, ai_message, human_message, metadata, partial, run, scripted_stream, server_error,
    session_with, values,
};
use pretty_assertions::assert_eq;
use std::rc::Rc;

#[tokio::test]
async fn no_runs_means_nothing_happens() {
    let graph = Rc::new(FakeGraph::default());
    let mut session = session_with(Rc::clone(&graph));

    session.reconnect_if_needed().await;

    assert!(session.messages.is_empty());
    assert!(!session.loading);
    assert_eq!(session.active_run(), None);
}

#[tokio::test]
async fn terminal_run_is_left_alone() {
    for status in ["success", "error", "timeout", "interrupted"] {
        let graph = Rc::new(FakeGraph::default());
        *graph.latest_run.borrow_mut() = Some(run("run-1", status));
        let mut session = session_with(Rc::clone(&graph));

        session.reconnect_if_needed().await;

        assert!(session.messages.is_empty(), "status {status} caused a mutation");
        assert!(!session.loading);
    }
}

#[tokio::test]
async fn running_run_is_joined_and_folded_to_its_snapshot() {
    let graph = Rc::new(FakeGraph::default());
    *graph.latest_run.borrow_mut() = Some(run("run-1", "running"));
    let snapshot = vec![human_message("u1", "hi"), ai_message("m1", "resumed reply")];
    graph.push_join_stream(Ok(scripted_stream(vec![
        metadata("run-1"),
        partial("m1", "resumed re"),
        values(snapshot.clone()),
    ])));
    let mut session = session_with(Rc::clone(&graph));

    session.reconnect_if_needed().await;

    assert_eq!(session.messages, snapshot);
    assert!(!session.loading);
    assert_eq!(session.active_run(), None);
}

#[tokio::test]
async fn pending_run_also_counts_as_resumable() {
    let graph = Rc::new(FakeGraph::default());
    *graph.latest_run.borrow_mut() = Some(run("run-1", "pending"));
    graph.push_join_stream(Ok(scripted_stream(vec![values(vec![ai_message("m1", "done")])])));
    let mut session = session_with(Rc::clone(&graph));

    session.reconnect_if_needed().await;

    assert_eq!(session.messages.len(), 1);
}

#[tokio::test]
async fn run_lookup_failure_is_silent() {
    let graph = Rc::new(FakeGraph::default());
    *graph.latest_run_fails.borrow_mut() = true;
    let mut session = session_with(Rc::clone(&graph));

    session.reconnect_if_needed().await;

    assert!(session.messages.is_empty());
    assert_eq!(session.error, None);
    assert!(!session.loading);
}

#[tokio::test]
async fn join_failure_cleans_up_without_surfacing_an_error() {
    let graph = Rc::new(FakeGraph::default());
    *graph.latest_run.borrow_mut() = Some(run("run-1", "running"));
    graph.push_join_stream(Err(server_error()));
    let mut session = session_with(Rc::clone(&graph));

    session.reconnect_if_needed().await;

    assert_eq!(session.error, None);
    assert!(!session.loading);
    assert_eq!(session.active_run(), None);
}
