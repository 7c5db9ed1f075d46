/// What the workbench did with one input event; the main loop redraws unless `Ignored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
    Quit,
}

impl EventResult {
    /// `Consumed` when the store reported a change.
    pub fn from_changed(state_changed: bool) -> Self {
        if state_changed {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }

    pub fn is_ignored(self) -> bool {
        self == EventResult::Ignored
    }

    pub fn is_quit(self) -> bool {
        self == EventResult::Quit
    }
}
