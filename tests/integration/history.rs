// Loading the persisted snapshot when a conversation view mounts.

use crate::helpers::{FakeGraph, ai_message, session_with, thread_state_of};
use pretty_assertions::assert_eq;
use std::rc::Rc;

#[tokio::test]
async fn history_replaces_the_timeline() {
    let graph = Rc::new(FakeGraph::default());
    *graph.thread_state.borrow_mut() = Some(thread_state_of(vec![
        serde_json::json!({"type": "human", "id": "u1", "content": "hi"}),
        serde_json::json!({"type": "ai", "id": "m1", "content": "hello"}),
    ]));
    let mut session = session_with(Rc::clone(&graph));
    session.messages.push(ai_message("stale", "leftover"));

    session.load_history().await;

    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[0].id(), "u1");
    assert_eq!(session.messages[1].id(), "m1");
}

#[tokio::test]
async fn undecodable_roles_are_dropped_from_history() {
    let graph = Rc::new(FakeGraph::default());
    *graph.thread_state.borrow_mut() = Some(thread_state_of(vec![
        serde_json::json!({"type": "system", "id": "s1", "content": "prompt"}),
        serde_json::json!({"type": "ai", "id": "m1", "content": "hello"}),
    ]));
    let mut session = session_with(Rc::clone(&graph));

    session.load_history().await;

    assert_eq!(session.messages.len(), 1);
    assert_eq!(session.messages[0].id(), "m1");
}

#[tokio::test]
async fn fetch_failure_empties_the_timeline_without_raising() {
    let graph = Rc::new(FakeGraph::default());
    let mut session = session_with(Rc::clone(&graph));
    session.messages.push(ai_message("stale", "leftover"));
    session.error = Some("unrelated earlier failure".to_owned());

    session.load_history().await;

    assert!(session.messages.is_empty());
    // History loading never touches the user-facing error field.
    assert_eq!(session.error, Some("unrelated earlier failure".to_owned()));
}

#[tokio::test]
async fn start_loads_history_then_checks_for_runs() {
    let graph = Rc::new(FakeGraph::default());
    *graph.thread_state.borrow_mut() = Some(thread_state_of(vec![
        serde_json::json!({"type": "human", "id": "u1", "content": "hi"}),
    ]));
    let mut session = session_with(Rc::clone(&graph));

    session.start().await;

    assert_eq!(session.messages.len(), 1);
    assert!(!session.loading);
}
