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

use agentput_client::Cli;
use agentput_client::config::Settings;
use agentput_client::error::AppError;
use agentput_client::graph::{Backend, GraphApi, GraphClient, Message};
use agentput_client::session::classify::{
    self, ToolCallKind, classify_tool_call, has_renderable_content,
};
use agentput_client::session::{ChatSession, threads};
use clap::Parser;
use std::fs::OpenOptions;
use std::rc::Rc;
use tokio::io::{AsyncBufReadExt as _, BufReader};

#[allow(clippy::exit)]
fn main() {
    if let Err(err) = run() {
        if let Some(app_error) = extract_app_error(&err) {
            eprintln!("{}", app_error.user_message());
            std::process::exit(app_error.exit_code());
        }
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let rt = tokio::runtime::Runtime::new()?;
    let local_set = tokio::task::LocalSet::new();

    rt.block_on(local_set.run_until(async move {
        let mut settings = Settings::load().await;
        let client = connect(&cli, &settings).await?;

        let assistant_id = resolve_assistant(&cli, &settings, &client).await?;
        tracing::info!(%assistant_id, "assistant resolved");

        if cli.save {
            settings.api_url = client.base_url().to_owned();
            settings.assistant_id = Some(assistant_id.clone());
            settings.configured = true;
            settings.save().await?;
            eprintln!("Saved configuration.");
        }

        let thread_id = resolve_thread(&cli, &client, &assistant_id).await?;
        eprintln!("Thread: {thread_id}");

        let mut session = ChatSession::new(Rc::new(client), thread_id, assistant_id);
        session.start().await;
        print_messages(&session.messages);

        repl(&mut session).await
    }))
}

/// Build a client from the CLI address or the saved settings and verify the
/// backend answers.
async fn connect(cli: &Cli, settings: &Settings) -> anyhow::Result<GraphClient> {
    let url = match (&cli.url, settings.configured) {
        (Some(url), _) => Some(url.as_str()),
        (None, true) => Some(settings.api_url.as_str()),
        (None, false) => None,
    };
    let backend = Backend::from_url(url)?;
    let client = backend.client().map_err(|_| AppError::NotConfigured)?;
    if !client.ping().await {
        return Err(AppError::BackendUnreachable.into());
    }
    Ok(client.clone())
}

/// Pick the assistant to talk to: explicit flag, then saved selection, then
/// the first one the backend advertises.
async fn resolve_assistant(
    cli: &Cli,
    settings: &Settings,
    client: &GraphClient,
) -> anyhow::Result<String> {
    if let Some(id) = &cli.assistant {
        return Ok(id.clone());
    }
    if let Some(id) = &settings.assistant_id {
        return Ok(id.clone());
    }
    let assistants = client.search_assistants(10).await?;
    let Some(first) = assistants.into_iter().next() else {
        return Err(AppError::NoAssistant.into());
    };
    tracing::info!(assistant_id = %first.assistant_id, name = %first.name, "using first advertised assistant");
    Ok(first.assistant_id)
}

/// Reuse the requested thread, fall back to the most recent conversation
/// for this assistant, and only then create a fresh one tagged with the
/// assistant so the thread directory can filter by it.
async fn resolve_thread(
    cli: &Cli,
    client: &GraphClient,
    assistant_id: &str,
) -> anyhow::Result<String> {
    match cli.thread.as_deref() {
        Some("new") => {}
        Some(thread_id) => return Ok(thread_id.to_owned()),
        None => {
            if let Some(thread) = threads::most_recent_thread(client, Some(assistant_id)).await? {
                eprintln!("Resuming: {}", threads::thread_title(&thread));
                return Ok(thread.thread_id);
            }
        }
    }
    let mut metadata = serde_json::Map::new();
    metadata.insert("assistant_id".to_owned(), serde_json::Value::String(assistant_id.to_owned()));
    let thread = client.create_thread(metadata).await?;
    Ok(thread.thread_id)
}

/// Line-oriented conversation loop. Ctrl-C during a turn cancels the active
/// run instead of killing the process.
async fn repl(session: &mut ChatSession) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("Type a message, \"/threads\" to list conversations, or \"/quit\" to exit.");

    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        let input = line.trim();
        match input {
            "" => {}
            "/quit" | "/exit" => return Ok(()),
            "/threads" => print_thread_directory(session).await,
            _ if input.starts_with("/delete ") => {
                delete_thread(session, input.trim_start_matches("/delete ").trim()).await;
            }
            _ => {
                let seen = session.messages.len();
                let canceller = session.canceller();
                let watcher = tokio::task::spawn_local(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        eprintln!("\nCancelling...");
                        canceller.cancel().await;
                    }
                });
                session.send(input).await;
                watcher.abort();

                print_messages(session.messages.get(seen..).unwrap_or_default());
                if let Some(error) = &session.error {
                    eprintln!("Error: {error}");
                }
            }
        }
    }
}

async fn delete_thread(session: &ChatSession, thread_id: &str) {
    if thread_id == session.thread_id() {
        eprintln!("Refusing to delete the active thread.");
        return;
    }
    match session.client().delete_thread(thread_id).await {
        Ok(()) => eprintln!("Deleted {thread_id}."),
        Err(err) => eprintln!("Could not delete {thread_id}: {err}"),
    }
}

async fn print_thread_directory(session: &ChatSession) {
    match threads::list_threads(session.client(), Some(session.assistant_id())).await {
        Ok(list) => {
            for thread in &list {
                let marker = if thread.thread_id == session.thread_id() { "*" } else { " " };
                println!(
                    "{marker} {}  {} ({} messages)",
                    thread.thread_id,
                    threads::thread_title(thread),
                    threads::message_count(thread),
                );
            }
        }
        Err(err) => eprintln!("Could not list threads: {err}"),
    }
}

fn print_messages(messages: &[Message]) {
    for message in messages {
        if !has_renderable_content(message) {
            continue;
        }
        match message {
            Message::Human(m) => println!("you: {}", m.content.as_text()),
            Message::Ai(m) => {
                let text = m.content.as_text();
                if !text.is_empty() {
                    println!("agent: {text}");
                }
                for call in &m.tool_calls {
                    print_tool_call(&classify_tool_call(call));
                }
            }
            Message::Tool(m) => {
                if let Some(todos) = classify::plan_update_from_result(m) {
                    print_plan(&todos);
                } else if let Some(result) = classify::delegation_result(m) {
                    println!("  [task result] {result}");
                } else if !m.is_success() {
                    println!("  [tool failed] {}", m.content.as_text());
                }
            }
        }
    }
}

fn print_tool_call(kind: &ToolCallKind<'_>) {
    match kind {
        ToolCallKind::PlanUpdate(todos) => print_plan(todos),
        ToolCallKind::Delegation { agent_type, description } => {
            println!("  [delegating to {agent_type}] {description}");
        }
        ToolCallKind::Generic(call) => {
            println!("  [{}] {}", call.name, serde_json::Value::Object(call.args.clone()));
        }
    }
}

fn print_plan(todos: &[agentput_client::graph::Todo]) {
    use agentput_client::graph::TodoStatus;
    for todo in todos {
        let mark = match todo.status {
            TodoStatus::Pending => " ",
            TodoStatus::InProgress => ">",
            TodoStatus::Completed => "x",
        };
        println!("  [{mark}] {}", todo.content);
    }
}

fn extract_app_error(err: &anyhow::Error) -> Option<AppError> {
    err.chain().find_map(|cause| cause.downcast_ref::<AppError>().cloned())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_ref() else {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!(
                "RUST_LOG is set, but tracing is disabled without --log-file <PATH>. \
Use --log-file to enable diagnostics."
            );
        }
        return Ok(());
    };

    let directives = cli
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_owned());
    let filter = tracing_subscriber::EnvFilter::try_new(directives.as_str())
        .map_err(|e| anyhow::anyhow!("invalid tracing filter `{directives}`: {e}"))?;

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if cli.log_append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    let file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("failed to open log file {}: {e}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;

    tracing::info!(
        target: "diagnostics",
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        log_filter = %directives,
        log_append = cli.log_append,
        "tracing enabled"
    );

    Ok(())
}
