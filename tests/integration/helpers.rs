use agentput_client::graph::{
    Assistant, EventStream, GraphApi, GraphError, Message, Run, StreamEvent, Thread, ThreadState,
};
use agentput_client::session::ChatSession;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A scripted backend. Each operation pops or clones a queued response;
/// running out of scripted streams is a test bug and panics.
#[derive(Default)]
pub struct FakeGraph {
    pub thread_state: RefCell<Option<ThreadState>>,
    pub latest_run: RefCell<Option<Run>>,
    pub latest_run_fails: RefCell<bool>,
    pub threads: RefCell<Vec<Thread>>,
    open_streams: RefCell<VecDeque<Result<EventStream, GraphError>>>,
    join_streams: RefCell<VecDeque<Result<EventStream, GraphError>>>,
    pub cancel_fails: RefCell<bool>,
    /// `(thread_id, run_id)` pairs, in call order.
    pub cancelled: RefCell<Vec<(String, String)>>,
    /// Inputs passed to `open_run`, in call order.
    pub sent_inputs: RefCell<Vec<String>>,
}

impl FakeGraph {
    pub fn push_open_stream(&self, stream: Result<EventStream, GraphError>) {
        self.open_streams.borrow_mut().push_back(stream);
    }

    pub fn push_join_stream(&self, stream: Result<EventStream, GraphError>) {
        self.join_streams.borrow_mut().push_back(stream);
    }
}

#[async_trait(?Send)]
impl GraphApi for FakeGraph {
    async fn create_thread(
        &self,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Thread, GraphError> {
        Ok(Thread {
            thread_id: "thread-new".to_owned(),
            created_at: String::new(),
            metadata,
            values: None,
        })
    }

    async fn thread_state(&self, _thread_id: &str) -> Result<ThreadState, GraphError> {
        self.thread_state.borrow().clone().ok_or_else(server_error)
    }

    async fn search_threads(
        &self,
        _assistant_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Thread>, GraphError> {
        Ok(self.threads.borrow().iter().take(limit).cloned().collect())
    }

    async fn delete_thread(&self, _thread_id: &str) -> Result<(), GraphError> {
        Ok(())
    }

    async fn latest_run(&self, _thread_id: &str) -> Result<Option<Run>, GraphError> {
        if *self.latest_run_fails.borrow() {
            return Err(server_error());
        }
        Ok(self.latest_run.borrow().clone())
    }

    async fn open_run(
        &self,
        _thread_id: &str,
        _assistant_id: &str,
        input: &str,
    ) -> Result<EventStream, GraphError> {
        self.sent_inputs.borrow_mut().push(input.to_owned());
        self.open_streams.borrow_mut().pop_front().expect("no scripted open_run stream")
    }

    async fn join_run(&self, _thread_id: &str, _run_id: &str) -> Result<EventStream, GraphError> {
        self.join_streams.borrow_mut().pop_front().expect("no scripted join_run stream")
    }

    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<(), GraphError> {
        self.cancelled.borrow_mut().push((thread_id.to_owned(), run_id.to_owned()));
        if *self.cancel_fails.borrow() { Err(server_error()) } else { Ok(()) }
    }

    async fn search_assistants(&self, _limit: usize) -> Result<Vec<Assistant>, GraphError> {
        Ok(Vec::new())
    }
}

pub fn server_error() -> GraphError {
    GraphError::Status {
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        message: "boom".to_owned(),
    }
}

pub fn session_with(graph: Rc<FakeGraph>) -> ChatSession {
    ChatSession::new(graph, "thread-1", "assistant-1")
}

/// A stream that yields the given items immediately and then closes.
pub fn scripted_stream(items: Vec<Result<StreamEvent, GraphError>>) -> EventStream {
    use futures::StreamExt as _;
    futures::stream::iter(items).boxed_local()
}

pub fn metadata(run_id: &str) -> Result<StreamEvent, GraphError> {
    Ok(StreamEvent::Metadata { run_id: run_id.to_owned() })
}

pub fn partial(id: &str, content: &str) -> Result<StreamEvent, GraphError> {
    Ok(StreamEvent::MessagesPartial(vec![ai_message(id, content)]))
}

pub fn values(messages: Vec<Message>) -> Result<StreamEvent, GraphError> {
    Ok(StreamEvent::Values { messages })
}

pub fn ai_message(id: &str, content: &str) -> Message {
    serde_json::from_value(serde_json::json!({
        "type": "ai", "id": id, "content": content,
    }))
    .expect("valid ai message")
}

pub fn human_message(id: &str, content: &str) -> Message {
    serde_json::from_value(serde_json::json!({
        "type": "human", "id": id, "content": content,
    }))
    .expect("valid human message")
}

pub fn run(run_id: &str, status: &str) -> Run {
    serde_json::from_value(serde_json::json!({
        "run_id": run_id,
        "thread_id": "thread-1",
        "assistant_id": "assistant-1",
        "status": status,
    }))
    .expect("valid run")
}

pub fn thread_state_of(messages: Vec<serde_json::Value>) -> ThreadState {
    serde_json::from_value(serde_json::json!({ "values": { "messages": messages } }))
        .expect("valid thread state")
}
