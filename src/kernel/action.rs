use std::path::PathBuf;

use crate::core::Command;
use crate::kernel::assist::AssistAction;
use crate::kernel::buffer::Motion;
use crate::kernel::state::{FocusTarget, Notice, ViewMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    InsertChar(char),
    InsertText(String),
    DeleteBackward,
    DeleteForward,
    Move { motion: Motion, extend: bool },
    SelectAll,
    ClearSelection,
    SetSelection { start: usize, end: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RunCommand(Command),
    Editor(EditorAction),
    SelectDocument {
        id: String,
    },
    CreateDocument,
    ImportDocument {
        name: Option<String>,
        content: String,
    },
    DeleteDocument {
        id: String,
    },
    ExportActive,
    SidebarMoveSelection {
        delta: isize,
    },
    SetViewMode(ViewMode),
    SetFocus(FocusTarget),
    Assist(AssistAction),
    AssistFinished {
        request_id: u64,
        result: Result<String, String>,
    },
    PromptAppend(char),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
    Notify(Notice),
    DismissNotice,
    /// Startup `--import`; goes through the same path as the prompt.
    ImportPath(PathBuf),
    Quit,
}
