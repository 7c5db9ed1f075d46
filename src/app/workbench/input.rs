use super::Workbench;
use crate::core::event::{InputEvent, Key, KeyCode};
use crate::kernel::services::adapters::KeybindingContext;
use crate::kernel::{Action as KernelAction, EditorAction, FocusTarget};
use crate::tui::view::EventResult;
use crossterm::event::KeyEvent;

pub(super) fn handle_input(workbench: &mut Workbench, event: &InputEvent) -> EventResult {
    let result = match event {
        InputEvent::Key(key_event) if event.is_key_press() => {
            workbench.handle_key_event(key_event)
        }
        InputEvent::Key(_) => EventResult::Ignored,
        InputEvent::Paste(text) => workbench.handle_paste(text),
        InputEvent::Resize(_, _) | InputEvent::Other => EventResult::Consumed,
    };

    if workbench.should_quit() {
        return EventResult::Quit;
    }
    result
}

impl Workbench {
    fn handle_key_event(&mut self, event: &KeyEvent) -> EventResult {
        let key = Key::from(*event);

        if self.store.state().ui.prompt.is_some() {
            return self.handle_prompt_key(&key);
        }

        let context = match self.store.state().ui.focus {
            FocusTarget::Editor => KeybindingContext::Editor,
            FocusTarget::Sidebar => KeybindingContext::Sidebar,
        };
        if let Some(command) = self.keybindings.resolve(context, &key).cloned() {
            tracing::trace!(command = command.name(), "key resolved");
            let _ = self.dispatch_kernel(KernelAction::RunCommand(command));
            // Bound keys are always swallowed, even when they change nothing.
            return EventResult::Consumed;
        }

        match (context, key.typed_char()) {
            (KeybindingContext::Editor, Some(ch)) => {
                let action = KernelAction::Editor(EditorAction::InsertChar(ch));
                EventResult::from_changed(self.dispatch_kernel(action))
            }
            _ => EventResult::Ignored,
        }
    }

    fn handle_prompt_key(&mut self, key: &Key) -> EventResult {
        let action = match key.code {
            KeyCode::Esc => KernelAction::PromptCancel,
            KeyCode::Enter => KernelAction::PromptSubmit,
            KeyCode::Backspace => KernelAction::PromptBackspace,
            _ => match key.typed_char() {
                Some(ch) => KernelAction::PromptAppend(ch),
                None => return EventResult::Ignored,
            },
        };
        EventResult::from_changed(self.dispatch_kernel(action))
    }

    fn handle_paste(&mut self, text: &str) -> EventResult {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        if self.store.state().ui.prompt.is_some() {
            let mut state_changed = false;
            for ch in text.chars().filter(|ch| *ch != '\n') {
                state_changed |= self.dispatch_kernel(KernelAction::PromptAppend(ch));
            }
            return EventResult::from_changed(state_changed);
        }
        if self.store.state().ui.focus != FocusTarget::Editor {
            return EventResult::Ignored;
        }
        let action = KernelAction::Editor(EditorAction::InsertText(text));
        EventResult::from_changed(self.dispatch_kernel(action))
    }
}
