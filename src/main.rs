use apibench::adapters::TungsteniteConnector;
use apibench::app::{App, AppMessage, Command};
use apibench::cli::{parse_args, version_line, CliCommand};
use apibench::executor::{Executor, ExecutorConfig};
use apibench::logging::{self, LogConfig};
use apibench::models::{Outcome, RequestSpec};
use apibench::terminal::{setup_panic_hook, TerminalManager};
use apibench::traits::HttpClient;
use apibench::ui;
use apibench::websocket::{SessionHandle, SessionManager, WsClientConfig};

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

fn main() -> Result<()> {
    if parse_args(std::env::args()) == CliCommand::Version {
        println!("{}", version_line());
        return Ok(());
    }

    color_eyre::install()?;
    // A missing log file never blocks start-up
    let _ = logging::init(&LogConfig::from_env());
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run())
}

async fn run() -> Result<()> {
    let mut term = TerminalManager::new()?;

    let executor = Arc::new(Executor::from_config(&ExecutorConfig::default()));
    let ws_config = WsClientConfig::default();
    let (manager, mut ws_events) =
        SessionManager::new(TungsteniteConnector::new(&ws_config), ws_config);
    let session = SessionHandle::spawn(manager);
    let mut ws_state = session.subscribe_state();

    let (message_tx, mut message_rx) = mpsc::unbounded_channel::<AppMessage>();
    let mut events = EventStream::new();
    let mut app = App::new();
    info!("apibench started");

    let result: Result<()> = loop {
        if let Err(e) = term.terminal().draw(|frame| ui::render(frame, &mut app)) {
            break Err(e.into());
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match app.handle_key(key) {
                        Some(Command::Quit) => break Ok(()),
                        Some(command) => dispatch(command, &executor, &session, &message_tx),
                        None => {}
                    }
                }
                Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                Some(Ok(_)) => {}
                Some(Err(e)) => break Err(e.into()),
                None => break Ok(()),
            },

            Some(message) = message_rx.recv() => app.apply_message(message),

            Some(event) = ws_events.recv() => app.push_log_event(event),

            changed = ws_state.changed() => {
                if changed.is_ok() {
                    let state = *ws_state.borrow_and_update();
                    app.on_ws_state(state);
                }
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Close any live session before giving the terminal back
    session.shutdown().await;
    term.restore()?;
    info!("apibench stopped");
    result
}

/// Carry out a command from the app without blocking the UI.
fn dispatch<C>(
    command: Command,
    executor: &Arc<Executor<C>>,
    session: &SessionHandle,
    message_tx: &mpsc::UnboundedSender<AppMessage>,
) where
    C: HttpClient + 'static,
{
    let queued = match command {
        Command::ExecuteRest(spec) => {
            spawn_request(executor, spec, message_tx, AppMessage::RestFinished);
            true
        }
        Command::ExecuteGraphql(spec) => {
            spawn_request(executor, spec, message_tx, AppMessage::GraphqlFinished);
            true
        }
        Command::WsConnect { url, headers } => session.connect(url, headers),
        Command::WsSend(text) => session.send(text),
        Command::WsDisconnect => session.disconnect(),
        Command::Quit => true,
    };
    if !queued {
        warn!("Session dispatcher is gone; command dropped");
    }
}

fn spawn_request<C>(
    executor: &Arc<Executor<C>>,
    spec: RequestSpec,
    message_tx: &mpsc::UnboundedSender<AppMessage>,
    wrap: fn(Outcome) -> AppMessage,
) where
    C: HttpClient + 'static,
{
    let executor = Arc::clone(executor);
    let tx = message_tx.clone();
    tokio::spawn(async move {
        let outcome = executor.execute(spec).await;
        // The loop may have quit while the request was in flight
        let _ = tx.send(wrap(outcome));
    });
}
