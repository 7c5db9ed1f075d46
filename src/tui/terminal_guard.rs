//! 终端会话：进入 raw mode / alternate screen，并保证在 drop、panic 或 SIGINT/SIGTERM 时恢复。

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// How long the main loop gets to exit on its own after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// The terminal modes the editor needs, behind a seam so tests never touch a tty.
pub trait Screen: Send + Sync + 'static {
    fn enter(&self) -> io::Result<()>;
    fn leave(&self) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct CrosstermScreen;

impl Screen for CrosstermScreen {
    fn enter(&self) -> io::Result<()> {
        use crossterm::cursor::SetCursorStyle;
        use crossterm::event::EnableBracketedPaste;
        use crossterm::execute;
        use crossterm::terminal::{enable_raw_mode, EnterAlternateScreen};

        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBar
        )
    }

    fn leave(&self) -> io::Result<()> {
        use crossterm::cursor::{SetCursorStyle, Show};
        use crossterm::event::DisableBracketedPaste;
        use crossterm::execute;
        use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};

        // Leave the alternate screen even when raw mode could not be dropped.
        let raw = disable_raw_mode();
        let screen = execute!(
            io::stdout(),
            DisableBracketedPaste,
            LeaveAlternateScreen,
            SetCursorStyle::DefaultUserShape,
            Show
        );
        raw.and(screen)
    }
}

/// Cloneable handle that puts the terminal back; shared by drop, the panic hook and the signal thread.
#[derive(Clone)]
pub struct ScreenRestorer {
    screen: Arc<dyn Screen>,
    active: Arc<Mutex<bool>>,
}

impl ScreenRestorer {
    /// Only the first call reaches the terminal.
    pub fn restore(&self) -> io::Result<()> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if !*active {
            return Ok(());
        }
        *active = false;
        self.screen.leave()
    }

    pub fn is_active(&self) -> bool {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct TerminalSession {
    restorer: ScreenRestorer,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        Self::enter_with(Arc::new(CrosstermScreen))
    }

    pub fn enter_with(screen: Arc<dyn Screen>) -> io::Result<Self> {
        screen.enter()?;
        Ok(Self {
            restorer: ScreenRestorer {
                screen,
                active: Arc::new(Mutex::new(true)),
            },
        })
    }

    pub fn restorer(&self) -> ScreenRestorer {
        self.restorer.clone()
    }

    /// Chains onto the current panic hook so the message lands on a usable screen.
    pub fn restore_on_panic(&self) {
        let restorer = self.restorer();
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restorer.restore();
            previous(info);
        }));
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restorer.restore();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl ShutdownSignal {
    /// `128 + signo`, as a shell reports it.
    pub fn exit_code(self) -> i32 {
        match self {
            ShutdownSignal::Interrupt => 130,
            ShutdownSignal::Terminate => 143,
        }
    }
}

/// Main-loop side of the signal listener.
pub struct ShutdownListener {
    rx: Receiver<ShutdownSignal>,
}

impl ShutdownListener {
    pub fn poll(&self) -> Option<ShutdownSignal> {
        self.rx.try_recv().ok()
    }

    /// A listener that never fires (platforms without POSIX signals, tests).
    pub fn inert() -> Self {
        let (_tx, rx) = mpsc::channel();
        Self { rx }
    }
}

/// Forwards the first SIGINT/SIGTERM to the main loop. If the loop has not
/// exited after [`SHUTDOWN_GRACE`], restores the screen and exits the process.
#[cfg(unix)]
pub fn listen_for_shutdown(restorer: ScreenRestorer) -> io::Result<ShutdownListener> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    let (tx, rx) = mpsc::channel();
    std::thread::Builder::new()
        .name("mdtyper-signals".to_string())
        .spawn(move || {
            let Some(raw) = signals.forever().next() else {
                return;
            };
            let signal = if raw == SIGINT {
                ShutdownSignal::Interrupt
            } else {
                ShutdownSignal::Terminate
            };
            tracing::info!(?signal, "shutdown signal received");
            let _ = tx.send(signal);

            std::thread::sleep(SHUTDOWN_GRACE);
            tracing::warn!(?signal, "main loop did not exit in time, forcing exit");
            let _ = restorer.restore();
            std::process::exit(signal.exit_code());
        })?;
    Ok(ShutdownListener { rx })
}

#[cfg(not(unix))]
pub fn listen_for_shutdown(_restorer: ScreenRestorer) -> io::Result<ShutdownListener> {
    Ok(ShutdownListener::inert())
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
