//! Terminal host and entry point.
//!
//! This module is the thin integration layer between the PhotoFindr library and
//! a terminal. It reads lines from stdin, feeds events to the controller,
//! executes the resulting actions on a single-threaded tokio runtime, and
//! redraws the screen on stdout.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │   current-thread tokio runtime           │
//! │  ┌──────────────────┐                    │
//! │  │  Host (AppState) │  ← event loop      │
//! │  └──────────────────┘                    │
//! │     ▲           │ spawn                  │
//! │     │ mpsc      ▼                        │
//! │  ┌──────────────────┐  ┌──────────────┐  │
//! │  │ stdin reader     │  │ Worker tasks │  │
//! │  └──────────────────┘  └──────────────┘  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! All state lives in the host task and is mutated only between awaits, one
//! event at a time. Backend calls are the only suspension points.
//!
//! # Commands
//!
//! - `:home`, `:search`: switch page
//! - `:theme`: toggle light/dark
//! - `:cancel`: cancel the running import
//! - `:dismiss`: hide the current notification
//! - `:quit`: exit
//!
//! Any other line submits the current page's form. When stdin ends, the host
//! waits for the running import or search to finish before exiting, and exits
//! with a failure code if the last import failed.

use photofindr::api::HttpBackend;
use photofindr::domain::IngestOutcome;
use photofindr::ui::{self, CLEAR_SCREEN};
use photofindr::worker::{Worker, WorkerMessage, WorkerResponse};
use photofindr::{handle_event, initialize, observability, parse_line, Action, AppState, Config, Event};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

const SCREEN_COLS: usize = 80;

/// Inputs to the host loop.
#[derive(Debug)]
enum HostEvent {
    /// A line read from stdin.
    Line(String),
    /// Stdin reached end of file or failed.
    InputClosed,
    /// An event produced by a worker task or timer.
    App(Event),
}

/// Host state: the controller state plus the channels to its side effects.
struct Host {
    app: AppState,
    worker: Arc<Worker>,
    events: UnboundedSender<HostEvent>,
    /// Set once stdin is exhausted; the loop then only waits for outstanding work.
    input_closed: bool,
    /// Whether the most recent import ended in failure.
    last_ingest_failed: bool,
}

impl Host {
    fn new(app: AppState, worker: Arc<Worker>, events: UnboundedSender<HostEvent>) -> Self {
        Self {
            app,
            worker,
            events,
            input_closed: false,
            last_ingest_failed: false,
        }
    }

    /// Processes one host event.
    ///
    /// # Returns
    ///
    /// `false` once the host should stop: on quit, or when stdin is closed and
    /// no import or search is still outstanding.
    fn update(&mut self, event: HostEvent) -> bool {
        let our_event = match event {
            HostEvent::Line(line) => match parse_line(&line, &self.app) {
                Some(event) => event,
                None => return true,
            },
            HostEvent::InputClosed => {
                self.input_closed = true;
                tracing::debug!(idle = self.app.is_idle(), "stdin closed");
                return !self.app.is_idle();
            }
            HostEvent::App(event) => event,
        };

        if let Event::WorkerResponse(WorkerResponse::IngestFinished { outcome }) = &our_event {
            self.last_ingest_failed = matches!(outcome, IngestOutcome::Failed(_));
        }

        let (should_render, actions) = handle_event(&mut self.app, &our_event);
        tracing::debug!(action_count = actions.len(), should_render = should_render, "event handled");

        let mut keep_running = true;
        for action in actions {
            keep_running &= self.execute_action(action);
        }
        if should_render && keep_running {
            self.render();
        }
        keep_running && !(self.input_closed && self.app.is_idle())
    }

    fn render(&self) {
        let screen = ui::render(&self.app, chrono::Utc::now(), SCREEN_COLS);
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = write!(stdout, "{CLEAR_SCREEN}{screen}> ").and_then(|()| stdout.flush()) {
            tracing::warn!(error = %e, "failed to write screen");
        }
    }

    /// Spawns a task that runs `message` on the worker and feeds the response back.
    fn post_worker_message(&self, message: WorkerMessage) {
        tracing::debug!(message = ?message, "posting message to worker");
        let worker = Arc::clone(&self.worker);
        let events = self.events.clone();

        tokio::spawn(async move {
            let response = worker.handle_message(message).await;
            if events.send(HostEvent::App(Event::WorkerResponse(response))).is_err() {
                tracing::debug!("host loop gone, dropping worker response");
            }
        });
    }

    /// Executes an action returned from event handling.
    ///
    /// Returns `false` for [`Action::Quit`].
    fn execute_action(&self, action: Action) -> bool {
        match action {
            Action::PostToWorker(message) => self.post_worker_message(message),
            Action::CancelIngest => self.worker.cancel_ingest(),
            Action::ScheduleDismiss { id, after } => {
                let events = self.events.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = events.send(HostEvent::App(Event::DismissNotification { id }));
                });
            }
            Action::Quit => return false,
        }
        true
    }
}

/// Forwards stdin lines to the host loop until EOF.
fn spawn_input_reader(events: UnboundedSender<HostEvent>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if events.send(HostEvent::Line(line)).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    let _ = events.send(HostEvent::InputClosed);
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read stdin");
                    let _ = events.send(HostEvent::InputClosed);
                    break;
                }
            }
        }
    });
}

/// Feeds host events to `host` until it asks to stop.
async fn serve(host: &mut Host, inbox: &mut UnboundedReceiver<HostEvent>) {
    while let Some(event) = inbox.recv().await {
        if !host.update(event) {
            break;
        }
    }
}

async fn run(config: Config) -> photofindr::Result<ExitCode> {
    let backend = HttpBackend::new(&config.backend_url, config.request_timeout())?;
    let worker = Arc::new(Worker::new(Arc::new(backend), config.request_timeout()));

    let (events, mut inbox): (UnboundedSender<HostEvent>, UnboundedReceiver<HostEvent>) =
        mpsc::unbounded_channel();

    let mut host = Host::new(initialize(&config), worker, events.clone());

    spawn_input_reader(events);
    host.post_worker_message(WorkerMessage::CheckHealth);
    host.render();

    serve(&mut host, &mut inbox).await;

    tracing::info!(last_ingest_failed = host.last_ingest_failed, "photofindr exiting");
    Ok(if host.last_ingest_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("photofindr: {e}");
            return ExitCode::FAILURE;
        }
    };

    observability::init_tracing(&config);
    tracing::info!(backend_url = %config.backend_url, timeout_secs = config.request_timeout_secs, "photofindr starting");

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("photofindr: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config)) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "photofindr failed");
            eprintln!("photofindr: {e}");
            ExitCode::FAILURE
        }
    }
}
