use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use mdtyper::app::{Workbench, WorkbenchDeps};
use mdtyper::core::event::InputEvent;
use mdtyper::kernel::services::adapters::{
    ensure_data_dir, ensure_settings_file, load_settings, AppMessage, AsyncRuntime,
    FileKeyValueStore, GeminiClient,
};
use mdtyper::tui::terminal_guard::{listen_for_shutdown, ShutdownListener, TerminalSession};

mod logging;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A minimalist Markdown editor for the terminal with an AI writing assistant
#[derive(Parser, Debug)]
#[command(name = "mdtyper")]
#[command(version)]
struct Cli {
    /// Directory holding the persisted documents (default: platform data dir)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory exported Markdown files are written to
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Import a Markdown file as a new document on startup
    #[arg(long, value_name = "FILE")]
    import: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let _logging = logging::init();

    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "failed to create default settings file");
    }
    let settings = load_settings().unwrap_or_default();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => ensure_data_dir()?,
    };
    let kv = FileKeyValueStore::open(&data_dir)
        .map_err(|e| io::Error::other(format!("cannot open data dir {}: {e}", data_dir.display())))?;
    let export_dir = cli
        .export_dir
        .or_else(|| settings.export_dir.clone())
        .map_or_else(std::env::current_dir, Ok)?;
    tracing::info!(
        data_dir = %data_dir.display(),
        export_dir = %export_dir.display(),
        "starting mdtyper"
    );

    let (msg_tx, msg_rx) = mpsc::channel::<AppMessage>();
    let runtime = AsyncRuntime::new(msg_tx)?;
    let generator = Arc::new(GeminiClient::new(settings.assistant.clone()));
    let mut workbench = Workbench::new(
        WorkbenchDeps {
            settings,
            kv: Box::new(kv),
            generator,
            export_dir,
        },
        runtime,
    );
    if let Some(path) = cli.import {
        workbench.import_path(path);
    }

    let session = TerminalSession::enter()?;
    session.restore_on_panic();
    let shutdown = listen_for_shutdown(session.restorer())?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal: Terminal<CrosstermBackend<Stdout>> = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut workbench, &msg_rx, &shutdown);

    drop(terminal);
    drop(session);
    if let Err(e) = &result {
        tracing::error!(error = %e, "main loop failed");
    }
    tracing::info!("mdtyper exiting");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    workbench: &mut Workbench,
    msg_rx: &mpsc::Receiver<AppMessage>,
    shutdown: &ShutdownListener,
) -> io::Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| workbench.render(frame, frame.area()))?;
            dirty = false;
        }

        while let Ok(msg) = msg_rx.try_recv() {
            dirty |= workbench.handle_message(msg);
        }

        if let Some(signal) = shutdown.poll() {
            tracing::info!(?signal, "shutting down on signal");
            return Ok(());
        }

        if crossterm::event::poll(POLL_INTERVAL)? {
            let event = InputEvent::from(crossterm::event::read()?);
            let result = workbench.handle_input(&event);
            if result.is_quit() {
                return Ok(());
            }
            dirty |= !result.is_ignored();
        }

        if workbench.should_quit() {
            return Ok(());
        }
    }
}
