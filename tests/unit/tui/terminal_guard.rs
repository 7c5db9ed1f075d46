use super::*;

#[derive(Default)]
struct FakeScreen {
    log: Mutex<Vec<&'static str>>,
}

impl FakeScreen {
    fn log(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().clone()
    }
}

impl Screen for FakeScreen {
    fn enter(&self) -> io::Result<()> {
        self.log.lock().unwrap().push("enter");
        Ok(())
    }

    fn leave(&self) -> io::Result<()> {
        self.log.lock().unwrap().push("leave");
        Ok(())
    }
}

struct NoTty;

impl Screen for NoTty {
    fn enter(&self) -> io::Result<()> {
        Err(io::Error::other("not a terminal"))
    }

    fn leave(&self) -> io::Result<()> {
        panic!("leave must not run when enter failed");
    }
}

#[test]
fn session_leaves_screen_on_drop() {
    let screen = Arc::new(FakeScreen::default());
    let restorer = {
        let session = TerminalSession::enter_with(screen.clone()).unwrap();
        let restorer = session.restorer();
        assert!(restorer.is_active());
        restorer
    };

    assert_eq!(screen.log(), ["enter", "leave"]);
    assert!(!restorer.is_active());
}

#[test]
fn restore_runs_once_across_clones() {
    let screen = Arc::new(FakeScreen::default());
    let session = TerminalSession::enter_with(screen.clone()).unwrap();
    let restorer = session.restorer();

    restorer.restore().unwrap();
    restorer.clone().restore().unwrap();
    drop(session);

    assert_eq!(screen.log(), ["enter", "leave"]);
}

#[test]
fn failed_enter_yields_no_session() {
    assert!(TerminalSession::enter_with(Arc::new(NoTty)).is_err());
}

#[test]
fn inert_listener_never_fires() {
    assert_eq!(ShutdownListener::inert().poll(), None);
}

#[test]
fn exit_codes_follow_shell_convention() {
    assert_eq!(ShutdownSignal::Interrupt.exit_code(), 130);
    assert_eq!(ShutdownSignal::Terminate.exit_code(), 143);
}
