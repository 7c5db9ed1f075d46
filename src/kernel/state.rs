use serde::{Deserialize, Serialize};

use super::active::ActiveDocument;
use super::assist::AssistState;
use super::buffer::EditorBuffer;
use super::document::{Document, DocumentStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Editor,
    #[default]
    Split,
    Preview,
}

impl ViewMode {
    pub fn next(self) -> Self {
        match self {
            ViewMode::Editor => ViewMode::Split,
            ViewMode::Split => ViewMode::Preview,
            ViewMode::Preview => ViewMode::Editor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Editor => "Editor",
            ViewMode::Split => "Split",
            ViewMode::Preview => "Preview",
        }
    }

    pub fn shows_editor(self) -> bool {
        self != ViewMode::Preview
    }

    pub fn shows_preview(self) -> bool {
        self != ViewMode::Editor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Sidebar,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A dismissible message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    ImportPath,
    ConfirmDelete { id: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub kind: PromptKind,
    pub input: String,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub view_mode: ViewMode,
    pub theme: ThemeMode,
    pub sidebar_open: bool,
    pub focus: FocusTarget,
    /// Highlighted row in the sidebar; may differ from the active document.
    pub sidebar_selected: usize,
    pub notice: Option<Notice>,
    pub prompt: Option<PromptState>,
    pub should_quit: bool,
}

impl UiState {
    pub fn new(view_mode: ViewMode, theme: ThemeMode) -> Self {
        Self {
            view_mode,
            theme,
            sidebar_open: true,
            focus: FocusTarget::Editor,
            sidebar_selected: 0,
            notice: None,
            prompt: None,
            should_quit: false,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(ViewMode::default(), ThemeMode::default())
    }
}

pub struct AppState {
    pub documents: DocumentStore,
    pub active: ActiveDocument,
    pub buffer: EditorBuffer,
    pub assist: AssistState,
    pub ui: UiState,
}

impl AppState {
    pub fn new(documents: Vec<Document>, active_id: Option<&str>, ui: UiState) -> Self {
        let documents = DocumentStore::new(documents);
        let active = ActiveDocument::new(active_id, documents.list());
        let mut state = Self {
            documents,
            active,
            buffer: EditorBuffer::default(),
            assist: AssistState::new(),
            ui,
        };
        state.reload_buffer();
        state.ui.sidebar_selected = state.active_index();
        state
    }

    pub fn active_document(&self) -> &Document {
        self.documents
            .get(self.active.id())
            .unwrap_or_else(|| self.documents.first())
    }

    pub fn active_index(&self) -> usize {
        self.documents.position(self.active.id()).unwrap_or(0)
    }

    /// Store → buffer. Only called when the active id changes.
    pub(super) fn reload_buffer(&mut self) {
        let content = self.active_document().content.clone();
        self.buffer.load(&content);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
