//! 快捷键：按键 → 命令（支持上下文）

use crate::core::event::Key;
use crate::core::event::{KeyCode, KeyModifiers};
use crate::core::Command;
use crate::kernel::services::ports::KeybindingRule;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingContext {
    Global,
    Editor,
    Sidebar,
}

impl KeybindingContext {
    pub fn parse(value: &str) -> Option<Self> {
        let v = value.trim().to_ascii_lowercase();
        match v.as_str() {
            "global" => Some(Self::Global),
            "editor" => Some(Self::Editor),
            "sidebar" | "documents" | "explorer" => Some(Self::Sidebar),
            _ => None,
        }
    }
}

pub struct KeybindingService {
    global: FxHashMap<Key, Command>,
    editor: FxHashMap<Key, Command>,
    sidebar: FxHashMap<Key, Command>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self::with_defaults()
    }

    pub fn with_defaults() -> Self {
        Self {
            global: default_global_keybindings(),
            editor: default_editor_keybindings(),
            sidebar: default_sidebar_keybindings(),
        }
    }

    pub fn resolve(&self, context: KeybindingContext, key: &Key) -> Option<&Command> {
        match context {
            KeybindingContext::Global => self.global.get(key),
            KeybindingContext::Editor => self.editor.get(key).or_else(|| self.global.get(key)),
            KeybindingContext::Sidebar => self.sidebar.get(key).or_else(|| self.global.get(key)),
        }
    }

    pub fn bindings(&self, context: KeybindingContext) -> &FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &self.global,
            KeybindingContext::Editor => &self.editor,
            KeybindingContext::Sidebar => &self.sidebar,
        }
    }

    pub fn bind(&mut self, context: KeybindingContext, key: Key, command: Command) {
        self.map_mut(context).insert(key, command);
    }

    pub fn unbind(&mut self, context: KeybindingContext, key: &Key) -> Option<Command> {
        self.map_mut(context).remove(key)
    }

    /// Layers user rules over the defaults. An empty command unbinds the key.
    /// Returns how many rules were skipped.
    pub fn apply_rules(&mut self, rules: &[KeybindingRule]) -> usize {
        let mut skipped = 0;
        for rule in rules {
            let key = match rule.key.parse::<Key>() {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!(error = %e, "unparseable keybinding");
                    skipped += 1;
                    continue;
                }
            };
            let context = match rule.context.as_deref() {
                Some(name) => match KeybindingContext::parse(name) {
                    Some(context) => context,
                    None => {
                        tracing::warn!(context = %name, "unknown keybinding context");
                        skipped += 1;
                        continue;
                    }
                },
                None => KeybindingContext::Global,
            };
            if rule.command.trim().is_empty() {
                let _ = self.unbind(context, &key);
            } else {
                self.bind(context, key, Command::from_name(&rule.command));
            }
        }
        skipped
    }

    fn map_mut(&mut self, context: KeybindingContext) -> &mut FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &mut self.global,
            KeybindingContext::Editor => &mut self.editor,
            KeybindingContext::Sidebar => &mut self.sidebar,
        }
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}

fn default_global_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(24);

    bindings.insert(Key::simple(KeyCode::Esc), Command::Escape);
    bindings.insert(Key::simple(KeyCode::Tab), Command::ToggleFocus);

    bindings.insert(Key::ctrl(KeyCode::Char('q')), Command::Quit);
    bindings.insert(Key::ctrl(KeyCode::Char('n')), Command::NewDocument);
    bindings.insert(Key::ctrl(KeyCode::Char('o')), Command::ImportDocument);
    bindings.insert(Key::ctrl(KeyCode::Char('e')), Command::ExportDocument);
    bindings.insert(Key::ctrl(KeyCode::PageDown), Command::NextDocument);
    bindings.insert(Key::ctrl(KeyCode::PageUp), Command::PrevDocument);

    bindings.insert(Key::ctrl(KeyCode::Char('b')), Command::ToggleSidebar);
    bindings.insert(Key::ctrl(KeyCode::Char('t')), Command::ToggleTheme);
    bindings.insert(Key::ctrl(KeyCode::Char('p')), Command::CycleViewMode);

    bindings.insert(Key::alt(KeyCode::Char('c')), Command::AssistContinue);
    bindings.insert(Key::alt(KeyCode::Char('s')), Command::AssistSummarize);
    bindings.insert(Key::alt(KeyCode::Char('g')), Command::AssistFixGrammar);
    bindings.insert(Key::alt(KeyCode::Char('x')), Command::AssistExplain);
    bindings.insert(Key::alt(KeyCode::Char('r')), Command::AssistTranslate);

    bindings
}

fn default_editor_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(24);

    bindings.insert(Key::simple(KeyCode::Left), Command::CursorLeft);
    bindings.insert(Key::simple(KeyCode::Right), Command::CursorRight);
    bindings.insert(Key::simple(KeyCode::Up), Command::CursorUp);
    bindings.insert(Key::simple(KeyCode::Down), Command::CursorDown);
    bindings.insert(Key::simple(KeyCode::Home), Command::CursorLineStart);
    bindings.insert(Key::simple(KeyCode::End), Command::CursorLineEnd);
    bindings.insert(Key::ctrl(KeyCode::Home), Command::CursorFileStart);
    bindings.insert(Key::ctrl(KeyCode::End), Command::CursorFileEnd);

    bindings.insert(Key::shift(KeyCode::Left), Command::SelectLeft);
    bindings.insert(Key::shift(KeyCode::Right), Command::SelectRight);
    bindings.insert(Key::shift(KeyCode::Up), Command::SelectUp);
    bindings.insert(Key::shift(KeyCode::Down), Command::SelectDown);
    bindings.insert(Key::shift(KeyCode::Home), Command::SelectLineStart);
    bindings.insert(Key::shift(KeyCode::End), Command::SelectLineEnd);
    bindings.insert(Key::ctrl(KeyCode::Char('a')), Command::SelectAll);

    bindings.insert(Key::simple(KeyCode::Enter), Command::InsertNewline);
    bindings.insert(Key::simple(KeyCode::Backspace), Command::DeleteBackward);
    bindings.insert(Key::simple(KeyCode::Delete), Command::DeleteForward);
    bindings.insert(
        Key::new(KeyCode::Tab, KeyModifiers::ALT),
        Command::InsertTab,
    );

    bindings
}

fn default_sidebar_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(8);

    bindings.insert(Key::simple(KeyCode::Up), Command::CursorUp);
    bindings.insert(Key::simple(KeyCode::Down), Command::CursorDown);
    bindings.insert(Key::simple(KeyCode::Enter), Command::OpenSelectedDocument);
    bindings.insert(Key::simple(KeyCode::Delete), Command::DeleteDocument);
    bindings.insert(Key::simple(KeyCode::Char('d')), Command::DeleteDocument);
    bindings.insert(Key::simple(KeyCode::Char('n')), Command::NewDocument);

    bindings
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/keybinding.rs"]
mod tests;
