// Send guards, optimistic append, failure reporting, and the cancel path.

use crate::helpers::{
    FakeGraph, ai_message, metadata, partial, scripted_stream, server_error, session_with, values,
};
use agentput_client::graph::{GraphError, Message, StreamEvent};
use futures::StreamExt as _;
use pretty_assertions::assert_eq;
use std::rc::Rc;

#[tokio::test]
async fn blank_input_is_a_no_op() {
    let graph = Rc::new(FakeGraph::default());
    let mut session = session_with(Rc::clone(&graph));

    session.send("   ").await;

    assert!(session.messages.is_empty());
    assert!(graph.sent_inputs.borrow().is_empty());
    assert!(!session.loading);
}

#[tokio::test]
async fn send_while_loading_is_a_no_op() {
    let graph = Rc::new(FakeGraph::default());
    let mut session = session_with(Rc::clone(&graph));
    session.loading = true;

    session.send("hello").await;

    assert!(session.messages.is_empty());
    assert!(graph.sent_inputs.borrow().is_empty());
}

#[tokio::test]
async fn successful_send_streams_the_reply_into_the_timeline() {
    let graph = Rc::new(FakeGraph::default());
    graph.push_open_stream(Ok(scripted_stream(vec![
        metadata("run-1"),
        partial("m1", "Hi"),
        partial("m1", "Hi there"),
        values(vec![ai_message("m1", "Hi there")]),
    ])));
    let mut session = session_with(Rc::clone(&graph));
    session.messages.push(ai_message("m0", "welcome"));

    session.send("hello").await;

    assert_eq!(*graph.sent_inputs.borrow(), ["hello"]);
    // The snapshot is authoritative, including over the optimistic message.
    assert_eq!(session.messages, vec![ai_message("m1", "Hi there")]);
    assert!(!session.loading);
    assert_eq!(session.active_run(), None);
    assert_eq!(session.error, None);
}

#[tokio::test]
async fn first_message_in_a_fresh_thread_runs_end_to_end() {
    let graph = Rc::new(FakeGraph::default());
    graph.push_open_stream(Ok(scripted_stream(vec![
        metadata("r1"),
        partial("m1", "Hi"),
        partial("m1", "Hi there"),
        values(vec![crate::helpers::human_message("u1", "hello"), ai_message("m1", "Hi there")]),
    ])));
    let mut session = session_with(Rc::clone(&graph));

    session.send("hello").await;

    assert_eq!(session.messages.len(), 2);
    assert!(matches!(&session.messages[0], Message::Human(m) if m.content.as_text() == "hello"));
    assert_eq!(session.messages[1].content().as_text(), "Hi there");
    assert!(!session.loading);
    assert_eq!(session.error, None);
}

#[tokio::test]
async fn input_is_trimmed_and_appended_optimistically() {
    let graph = Rc::new(FakeGraph::default());
    graph.push_open_stream(Ok(scripted_stream(Vec::new())));
    let mut session = session_with(Rc::clone(&graph));

    session.send("  hello  ").await;

    assert_eq!(*graph.sent_inputs.borrow(), ["hello"]);
    assert_eq!(session.messages.len(), 1);
    assert!(matches!(&session.messages[0], Message::Human(m) if m.content.as_text() == "hello"));
}

#[tokio::test]
async fn failed_run_keeps_the_user_message_and_sets_the_error() {
    let graph = Rc::new(FakeGraph::default());
    graph.push_open_stream(Err(server_error()));
    let mut session = session_with(Rc::clone(&graph));

    session.send("hello").await;

    assert_eq!(session.messages.len(), 1);
    assert!(matches!(&session.messages[0], Message::Human(_)));
    let error = session.error.as_deref().expect("error is set");
    assert!(error.contains("500"), "unexpected error text: {error}");
    assert!(!session.loading);
}

#[tokio::test]
async fn a_new_send_clears_the_previous_error() {
    let graph = Rc::new(FakeGraph::default());
    graph.push_open_stream(Ok(scripted_stream(Vec::new())));
    let mut session = session_with(Rc::clone(&graph));
    session.error = Some("stale failure".to_owned());

    session.send("hello").await;

    assert_eq!(session.error, None);
}

#[tokio::test]
async fn cancel_without_active_run_clears_loading_and_skips_the_network() {
    let graph = Rc::new(FakeGraph::default());
    let mut session = session_with(Rc::clone(&graph));
    session.loading = true;

    session.cancel().await;

    assert!(!session.loading);
    assert!(graph.cancelled.borrow().is_empty());
}

#[tokio::test]
async fn cancel_mid_stream_suppresses_the_failure() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let graph = Rc::new(FakeGraph::default());

            // Channel-backed stream so the canceller can act while the send
            // is parked waiting for the next event.
            let (tx, rx) = futures::channel::mpsc::unbounded();
            graph.push_open_stream(Ok(rx.boxed_local()));

            let mut session = session_with(Rc::clone(&graph));
            let canceller = session.canceller();

            tx.unbounded_send(Ok(StreamEvent::Metadata { run_id: "run-1".to_owned() }))
                .expect("send metadata");
            let graph_for_driver = Rc::clone(&graph);
            let driver = tokio::task::spawn_local(async move {
                // Give the send loop a chance to record the run id.
                tokio::task::yield_now().await;
                tokio::task::yield_now().await;
                canceller.cancel().await;
                assert_eq!(
                    *graph_for_driver.cancelled.borrow(),
                    [("thread-1".to_owned(), "run-1".to_owned())]
                );
                // The server tears the stream down in response.
                tx.unbounded_send(Err(crate::helpers::server_error())).expect("send error");
                drop(tx);
            });

            session.send("hello").await;
            driver.await.expect("driver task");

            // A user abort is not a failure.
            assert_eq!(session.error, None);
            assert!(!session.loading);
            assert_eq!(session.active_run(), None);
        })
        .await;
}

#[tokio::test]
async fn cancel_request_failure_is_swallowed() {
    let graph = Rc::new(FakeGraph::default());
    *graph.cancel_fails.borrow_mut() = true;
    let mut session = session_with(Rc::clone(&graph));
    session.apply_event(StreamEvent::Metadata { run_id: "run-1".to_owned() });

    session.cancel().await;

    assert_eq!(graph.cancelled.borrow().len(), 1);
    assert_eq!(session.active_run(), None);
    assert_eq!(session.error, None);
}

#[tokio::test]
async fn cancelled_error_category_is_distinguishable() {
    assert!(GraphError::Cancelled.is_cancelled());
    assert!(!server_error().is_cancelled());
}
