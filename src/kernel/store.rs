use std::path::PathBuf;

use crate::core::Command;

use super::assist::{splice, AssistAction, PendingAssist};
use super::buffer::Motion;
use super::document::DocumentError;
use super::effect::ExportArtifact;
use super::state::{FocusTarget, Notice, NoticeLevel, PromptKind, PromptState, ViewMode};
use super::{Action, AppState, Effect, EditorAction};

const TAB_TEXT: &str = "    ";

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn with_effects(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: true,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::RunCommand(cmd) => self.dispatch_command(cmd),
            Action::Editor(editor_action) => self.dispatch_editor(editor_action),
            Action::SelectDocument { id } => self.select_document(&id),
            Action::CreateDocument => self.create_document(None, String::new()),
            Action::ImportDocument { name, content } => {
                let name = name.unwrap_or_else(|| self.state.documents.imported_name());
                let mut result = self.create_document(Some(name), content);
                let imported = self.state.active_document().name.clone();
                self.state.ui.notice = Some(Notice::info(format!("Imported {imported}")));
                result.state_changed = true;
                result
            }
            Action::DeleteDocument { id } => self.delete_document(&id),
            Action::ExportActive => DispatchResult {
                effects: vec![Effect::WriteExport(ExportArtifact::from_document(
                    self.state.active_document(),
                ))],
                state_changed: false,
            },
            Action::SidebarMoveSelection { delta } => {
                let len = self.state.documents.len() as isize;
                let prev = self.state.ui.sidebar_selected;
                let next = (prev as isize + delta).clamp(0, len - 1) as usize;
                self.state.ui.sidebar_selected = next;
                DispatchResult::changed(next != prev)
            }
            Action::SetViewMode(mode) => {
                let prev = self.state.ui.view_mode;
                self.state.ui.view_mode = mode;
                if !mode.shows_editor() && self.state.ui.focus == FocusTarget::Editor {
                    self.state.buffer.clear_selection();
                }
                DispatchResult::changed(prev != mode)
            }
            Action::SetFocus(target) => {
                let prev = self.state.ui.focus;
                if target == FocusTarget::Sidebar {
                    self.state.ui.sidebar_open = true;
                    self.state.ui.sidebar_selected = self.state.active_index();
                }
                self.state.ui.focus = target;
                DispatchResult::changed(prev != target)
            }
            Action::Assist(assist) => self.begin_assist(assist),
            Action::AssistFinished { request_id, result } => {
                self.finish_assist(request_id, result)
            }
            Action::PromptAppend(ch) => self.prompt_append(ch),
            Action::PromptBackspace => match self.state.ui.prompt.as_mut() {
                Some(prompt) => DispatchResult::changed(prompt.input.pop().is_some()),
                None => DispatchResult::unchanged(),
            },
            Action::PromptSubmit => self.prompt_submit(),
            Action::PromptCancel => DispatchResult::changed(self.state.ui.prompt.take().is_some()),
            Action::Notify(notice) => {
                match notice.level {
                    NoticeLevel::Error => {
                        tracing::warn!(message = %notice.message, "error notice")
                    }
                    _ => tracing::debug!(message = %notice.message, "notice"),
                }
                self.state.ui.notice = Some(notice);
                DispatchResult::changed(true)
            }
            Action::DismissNotice => DispatchResult::changed(self.state.ui.notice.take().is_some()),
            Action::ImportPath(path) => DispatchResult {
                effects: vec![Effect::ReadImport(path)],
                state_changed: false,
            },
            Action::Quit => {
                self.state.ui.should_quit = true;
                DispatchResult::changed(true)
            }
        }
    }

    fn dispatch_command(&mut self, cmd: Command) -> DispatchResult {
        if let Some(assist) = cmd.assist_action() {
            return self.begin_assist(assist);
        }

        let in_sidebar = self.state.ui.focus == FocusTarget::Sidebar;
        let editor_only = is_editor_only(&cmd);
        let editor_motion = |motion: Motion, extend: bool| {
            Action::Editor(EditorAction::Move { motion, extend })
        };

        match cmd {
            Command::CursorUp | Command::SelectUp if in_sidebar => {
                self.dispatch(Action::SidebarMoveSelection { delta: -1 })
            }
            Command::CursorDown | Command::SelectDown if in_sidebar => {
                self.dispatch(Action::SidebarMoveSelection { delta: 1 })
            }
            Command::InsertNewline if in_sidebar => {
                self.dispatch(Action::RunCommand(Command::OpenSelectedDocument))
            }
            Command::DeleteBackward | Command::DeleteForward if in_sidebar => {
                self.dispatch(Action::RunCommand(Command::DeleteDocument))
            }
            _ if in_sidebar && editor_only => DispatchResult::unchanged(),

            Command::CursorLeft => self.dispatch(editor_motion(Motion::Left, false)),
            Command::CursorRight => self.dispatch(editor_motion(Motion::Right, false)),
            Command::CursorUp => self.dispatch(editor_motion(Motion::Up, false)),
            Command::CursorDown => self.dispatch(editor_motion(Motion::Down, false)),
            Command::CursorLineStart => self.dispatch(editor_motion(Motion::LineStart, false)),
            Command::CursorLineEnd => self.dispatch(editor_motion(Motion::LineEnd, false)),
            Command::CursorFileStart => self.dispatch(editor_motion(Motion::DocStart, false)),
            Command::CursorFileEnd => self.dispatch(editor_motion(Motion::DocEnd, false)),
            Command::SelectLeft => self.dispatch(editor_motion(Motion::Left, true)),
            Command::SelectRight => self.dispatch(editor_motion(Motion::Right, true)),
            Command::SelectUp => self.dispatch(editor_motion(Motion::Up, true)),
            Command::SelectDown => self.dispatch(editor_motion(Motion::Down, true)),
            Command::SelectLineStart => self.dispatch(editor_motion(Motion::LineStart, true)),
            Command::SelectLineEnd => self.dispatch(editor_motion(Motion::LineEnd, true)),
            Command::SelectAll => self.dispatch_editor(EditorAction::SelectAll),
            Command::ClearSelection => self.dispatch_editor(EditorAction::ClearSelection),
            Command::InsertNewline => self.dispatch_editor(EditorAction::InsertChar('\n')),
            Command::InsertTab => self.dispatch_editor(EditorAction::InsertText(TAB_TEXT.into())),
            Command::DeleteBackward => self.dispatch_editor(EditorAction::DeleteBackward),
            Command::DeleteForward => self.dispatch_editor(EditorAction::DeleteForward),

            Command::NewDocument => self.dispatch(Action::CreateDocument),
            Command::DeleteDocument => self.confirm_delete(),
            Command::NextDocument => self.step_document(1),
            Command::PrevDocument => self.step_document(-1),
            Command::OpenSelectedDocument => {
                let index = self.state.ui.sidebar_selected;
                match self.state.documents.list().get(index) {
                    Some(doc) => {
                        let id = doc.id.clone();
                        let mut result = self.select_document(&id);
                        if self.state.ui.focus != FocusTarget::Editor {
                            self.state.ui.focus = FocusTarget::Editor;
                            result.state_changed = true;
                        }
                        result
                    }
                    None => DispatchResult::unchanged(),
                }
            }
            Command::ImportDocument => {
                self.state.ui.prompt = Some(PromptState {
                    kind: PromptKind::ImportPath,
                    input: String::new(),
                });
                DispatchResult::changed(true)
            }
            Command::ExportDocument => self.dispatch(Action::ExportActive),

            Command::ToggleSidebar => {
                self.state.ui.sidebar_open = !self.state.ui.sidebar_open;
                if !self.state.ui.sidebar_open {
                    self.state.ui.focus = FocusTarget::Editor;
                }
                DispatchResult::changed(true)
            }
            Command::ToggleTheme => {
                self.state.ui.theme = self.state.ui.theme.toggle();
                DispatchResult::changed(true)
            }
            Command::CycleViewMode => {
                let next = self.state.ui.view_mode.next();
                self.dispatch(Action::SetViewMode(next))
            }
            Command::ViewEditor => {
                self.dispatch(Action::SetViewMode(ViewMode::Editor))
            }
            Command::ViewSplit => self.dispatch(Action::SetViewMode(ViewMode::Split)),
            Command::ViewPreview => {
                self.dispatch(Action::SetViewMode(ViewMode::Preview))
            }
            Command::FocusSidebar => self.dispatch(Action::SetFocus(FocusTarget::Sidebar)),
            Command::FocusEditor => self.dispatch(Action::SetFocus(FocusTarget::Editor)),
            Command::ToggleFocus => {
                let target = match self.state.ui.focus {
                    FocusTarget::Editor => FocusTarget::Sidebar,
                    FocusTarget::Sidebar => FocusTarget::Editor,
                };
                self.dispatch(Action::SetFocus(target))
            }

            Command::Escape => self.escape(),
            Command::Quit => self.dispatch(Action::Quit),
            Command::AssistContinue
            | Command::AssistSummarize
            | Command::AssistFixGrammar
            | Command::AssistExplain
            | Command::AssistTranslate => DispatchResult::unchanged(),
            Command::Custom(name) => {
                self.state.ui.notice = Some(Notice::warning(format!("Unknown command: {name}")));
                DispatchResult::changed(true)
            }
        }
    }

    fn dispatch_editor(&mut self, action: EditorAction) -> DispatchResult {
        let is_edit = matches!(
            action,
            EditorAction::InsertChar(_)
                | EditorAction::InsertText(_)
                | EditorAction::DeleteBackward
                | EditorAction::DeleteForward
        );
        // The preview-only layout still lets the cursor move (it drives preview scrolling).
        if is_edit && !self.state.ui.view_mode.shows_editor() {
            return DispatchResult::unchanged();
        }

        let buffer = &mut self.state.buffer;
        let before_len = buffer.text().len();
        let (changed, edited) = match action {
            EditorAction::InsertChar(ch) => {
                let changed = buffer.insert_char(ch);
                (changed, changed)
            }
            EditorAction::InsertText(text) => {
                let changed = buffer.insert_str(&text);
                (changed, changed)
            }
            EditorAction::DeleteBackward => {
                let changed = buffer.delete_backward();
                (changed, changed)
            }
            EditorAction::DeleteForward => {
                let changed = buffer.delete_forward();
                (changed, changed)
            }
            EditorAction::Move { motion, extend } => (buffer.move_cursor(motion, extend), false),
            EditorAction::SelectAll => (buffer.select_all(), false),
            EditorAction::ClearSelection => (buffer.clear_selection(), false),
            EditorAction::SetSelection { start, end } => (buffer.set_selection(start, end), false),
        };

        if !edited {
            return DispatchResult::changed(changed);
        }

        tracing::trace!(
            before = before_len,
            after = self.state.buffer.text().len(),
            "buffer edited"
        );
        DispatchResult::with_effects(self.write_back())
    }

    /// Buffer → store, then the explicit persist step.
    fn write_back(&mut self) -> Vec<Effect> {
        let id = self.state.active.id().to_string();
        if !self.state.documents.update(&id, self.state.buffer.text()) {
            tracing::warn!(doc_id = %id, "active document missing during write-back");
            return Vec::new();
        }
        vec![self.persist_documents()]
    }

    fn persist_documents(&self) -> Effect {
        Effect::PersistDocuments(self.state.documents.list().to_vec())
    }

    fn select_document(&mut self, id: &str) -> DispatchResult {
        if !self.state.documents.contains(id) {
            return DispatchResult::unchanged();
        }
        self.state.ui.sidebar_selected = self.state.documents.position(id).unwrap_or(0);
        if !self.state.active.select(id) {
            return DispatchResult::changed(true);
        }
        self.state.reload_buffer();
        DispatchResult::with_effects(vec![Effect::PersistActiveId(id.to_string())])
    }

    fn create_document(&mut self, name: Option<String>, content: String) -> DispatchResult {
        let id = self.state.documents.create(name, content).id.clone();
        let mut effects = vec![self.persist_documents()];
        effects.extend(self.select_document(&id).effects);
        self.state.ui.focus = FocusTarget::Editor;
        DispatchResult::with_effects(effects)
    }

    fn delete_document(&mut self, id: &str) -> DispatchResult {
        match self.state.documents.delete(id) {
            Ok(removed) => {
                let mut effects = vec![self.persist_documents()];
                if self.state.active.reconcile(self.state.documents.list()) {
                    self.state.reload_buffer();
                    effects.push(Effect::PersistActiveId(self.state.active.id().to_string()));
                }
                let last = self.state.documents.len() - 1;
                self.state.ui.sidebar_selected = self.state.ui.sidebar_selected.min(last);
                self.state.ui.notice = Some(Notice::info(format!("Deleted {}", removed.name)));
                DispatchResult::with_effects(effects)
            }
            Err(DocumentError::LastDocument) => {
                self.state.ui.notice = Some(Notice::warning(DocumentError::LastDocument.to_string()));
                DispatchResult::changed(true)
            }
            Err(e @ DocumentError::NotFound(_)) => {
                tracing::debug!(error = %e, "delete ignored");
                DispatchResult::unchanged()
            }
        }
    }

    fn confirm_delete(&mut self) -> DispatchResult {
        if self.state.documents.len() == 1 {
            self.state.ui.notice = Some(Notice::warning(DocumentError::LastDocument.to_string()));
            return DispatchResult::changed(true);
        }
        let doc = if self.state.ui.focus == FocusTarget::Sidebar {
            self.state
                .documents
                .list()
                .get(self.state.ui.sidebar_selected)
                .unwrap_or_else(|| self.state.active_document())
        } else {
            self.state.active_document()
        };
        let kind = PromptKind::ConfirmDelete {
            id: doc.id.clone(),
            name: doc.name.clone(),
        };
        self.state.ui.prompt = Some(PromptState {
            kind,
            input: String::new(),
        });
        DispatchResult::changed(true)
    }

    fn step_document(&mut self, delta: isize) -> DispatchResult {
        let len = self.state.documents.len() as isize;
        let index = (self.state.active_index() as isize + delta).rem_euclid(len) as usize;
        let id = self.state.documents.list()[index].id.clone();
        self.select_document(&id)
    }

    fn escape(&mut self) -> DispatchResult {
        if self.state.ui.prompt.take().is_some() {
            return DispatchResult::changed(true);
        }
        if self.state.ui.notice.take().is_some() {
            return DispatchResult::changed(true);
        }
        if self.state.buffer.clear_selection() {
            return DispatchResult::changed(true);
        }
        if self.state.ui.focus == FocusTarget::Sidebar {
            self.state.ui.focus = FocusTarget::Editor;
            return DispatchResult::changed(true);
        }
        DispatchResult::unchanged()
    }

    fn prompt_append(&mut self, ch: char) -> DispatchResult {
        let Some(prompt) = self.state.ui.prompt.as_mut() else {
            return DispatchResult::unchanged();
        };
        match &prompt.kind {
            PromptKind::ImportPath => {
                prompt.input.push(ch);
                DispatchResult::changed(true)
            }
            PromptKind::ConfirmDelete { .. } => {
                if ch.eq_ignore_ascii_case(&'y') {
                    self.prompt_submit()
                } else {
                    self.state.ui.prompt = None;
                    DispatchResult::changed(true)
                }
            }
        }
    }

    fn prompt_submit(&mut self) -> DispatchResult {
        let Some(prompt) = self.state.ui.prompt.take() else {
            return DispatchResult::unchanged();
        };
        match prompt.kind {
            PromptKind::ImportPath => {
                let input = prompt.input.trim();
                if input.is_empty() {
                    return DispatchResult::changed(true);
                }
                DispatchResult::with_effects(vec![Effect::ReadImport(expand_home(input))])
            }
            PromptKind::ConfirmDelete { id, .. } => {
                let mut result = self.delete_document(&id);
                result.state_changed = true;
                result
            }
        }
    }

    fn begin_assist(&mut self, action: AssistAction) -> DispatchResult {
        let (start, end) = self.state.buffer.selection();
        let doc_id = self.state.active.id().to_string();
        match self
            .state
            .assist
            .begin(&doc_id, action, start, end, self.state.buffer.text())
        {
            Ok((request_id, request)) => {
                tracing::info!(request_id, action = ?action, doc_id = %doc_id, "assist requested");
                self.state.ui.notice = Some(Notice::info(format!("{}…", action.label())));
                DispatchResult::with_effects(vec![Effect::RequestGeneration {
                    request_id,
                    request,
                }])
            }
            Err(rejection) => {
                self.state.ui.notice = Some(Notice::warning(rejection.to_string()));
                DispatchResult::changed(true)
            }
        }
    }

    fn finish_assist(&mut self, request_id: u64, result: Result<String, String>) -> DispatchResult {
        let Some(pending) = self.state.assist.finish(request_id) else {
            tracing::debug!(request_id, "stale assist result dropped");
            return DispatchResult::unchanged();
        };

        match result {
            Ok(text) => self.apply_assist(pending, &text),
            Err(message) => {
                tracing::warn!(request_id, error = %message, "assist failed");
                self.state.ui.notice = Some(Notice::error(message));
                DispatchResult::changed(true)
            }
        }
    }

    fn apply_assist(&mut self, pending: PendingAssist, generated: &str) -> DispatchResult {
        let discarded = || {
            Notice::warning(format!(
                "{}: document changed while the assistant was working; result discarded",
                pending.action.label()
            ))
        };

        if pending.doc_id == self.state.active.id() {
            if !pending.still_applies(self.state.buffer.text()) {
                self.state.ui.notice = Some(discarded());
                return DispatchResult::changed(true);
            }
            let (text, cursor) = splice(
                pending.action,
                self.state.buffer.text(),
                pending.start,
                pending.end,
                generated,
            );
            self.state.buffer.replace_text(text, cursor);
            let effects = self.write_back();
            self.state.ui.notice = Some(Notice::info(format!("{} applied", pending.action.label())));
            return DispatchResult::with_effects(effects);
        }

        let Some(doc) = self.state.documents.get(&pending.doc_id) else {
            self.state.ui.notice = Some(discarded());
            return DispatchResult::changed(true);
        };
        if !pending.still_applies(&doc.content) {
            self.state.ui.notice = Some(discarded());
            return DispatchResult::changed(true);
        }
        let name = doc.name.clone();
        let (text, _) = splice(pending.action, &doc.content, pending.start, pending.end, generated);
        self.state.documents.update(&pending.doc_id, &text);
        self.state.ui.notice = Some(Notice::info(format!(
            "{} applied to {name}",
            pending.action.label()
        )));
        DispatchResult::with_effects(vec![self.persist_documents()])
    }
}

fn is_editor_only(cmd: &Command) -> bool {
    matches!(
        cmd,
        Command::CursorLeft
            | Command::CursorRight
            | Command::CursorLineStart
            | Command::CursorLineEnd
            | Command::CursorFileStart
            | Command::CursorFileEnd
            | Command::SelectLeft
            | Command::SelectRight
            | Command::SelectLineStart
            | Command::SelectLineEnd
            | Command::SelectAll
            | Command::InsertTab
    )
}

fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(input)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
