//! 命令系统：语义命令定义
//!
//! Commands are what key bindings resolve to; they never carry key details.

use crate::kernel::assist::AssistAction;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // ==================== 光标移动 ====================
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorLineStart,
    CursorLineEnd,
    CursorFileStart,
    CursorFileEnd,

    // ==================== 选择操作 ====================
    SelectLeft,
    SelectRight,
    SelectUp,
    SelectDown,
    SelectLineStart,
    SelectLineEnd,
    SelectAll,
    ClearSelection,

    // ==================== 编辑操作 ====================
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,

    // ==================== 文档操作 ====================
    NewDocument,
    DeleteDocument,
    NextDocument,
    PrevDocument,
    OpenSelectedDocument,
    ImportDocument,
    ExportDocument,

    // ==================== 视图操作 ====================
    ToggleSidebar,
    ToggleTheme,
    CycleViewMode,
    ViewEditor,
    ViewSplit,
    ViewPreview,
    FocusSidebar,
    FocusEditor,
    ToggleFocus,

    // ==================== 写作助手 ====================
    AssistContinue,
    AssistSummarize,
    AssistFixGrammar,
    AssistExplain,
    AssistTranslate,

    // ==================== 系统操作 ====================
    Escape,
    Quit,

    // ==================== 扩展点 ====================
    Custom(String),
}

const NAMED: &[Command] = &[
    Command::CursorLeft,
    Command::CursorRight,
    Command::CursorUp,
    Command::CursorDown,
    Command::CursorLineStart,
    Command::CursorLineEnd,
    Command::CursorFileStart,
    Command::CursorFileEnd,
    Command::SelectLeft,
    Command::SelectRight,
    Command::SelectUp,
    Command::SelectDown,
    Command::SelectLineStart,
    Command::SelectLineEnd,
    Command::SelectAll,
    Command::ClearSelection,
    Command::InsertNewline,
    Command::InsertTab,
    Command::DeleteBackward,
    Command::DeleteForward,
    Command::NewDocument,
    Command::DeleteDocument,
    Command::NextDocument,
    Command::PrevDocument,
    Command::OpenSelectedDocument,
    Command::ImportDocument,
    Command::ExportDocument,
    Command::ToggleSidebar,
    Command::ToggleTheme,
    Command::CycleViewMode,
    Command::ViewEditor,
    Command::ViewSplit,
    Command::ViewPreview,
    Command::FocusSidebar,
    Command::FocusEditor,
    Command::ToggleFocus,
    Command::AssistContinue,
    Command::AssistSummarize,
    Command::AssistFixGrammar,
    Command::AssistExplain,
    Command::AssistTranslate,
    Command::Escape,
    Command::Quit,
];

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Command::CursorLeft => "cursorLeft",
            Command::CursorRight => "cursorRight",
            Command::CursorUp => "cursorUp",
            Command::CursorDown => "cursorDown",
            Command::CursorLineStart => "cursorLineStart",
            Command::CursorLineEnd => "cursorLineEnd",
            Command::CursorFileStart => "cursorFileStart",
            Command::CursorFileEnd => "cursorFileEnd",
            Command::SelectLeft => "selectLeft",
            Command::SelectRight => "selectRight",
            Command::SelectUp => "selectUp",
            Command::SelectDown => "selectDown",
            Command::SelectLineStart => "selectLineStart",
            Command::SelectLineEnd => "selectLineEnd",
            Command::SelectAll => "selectAll",
            Command::ClearSelection => "clearSelection",
            Command::InsertNewline => "insertNewline",
            Command::InsertTab => "insertTab",
            Command::DeleteBackward => "deleteBackward",
            Command::DeleteForward => "deleteForward",
            Command::NewDocument => "newDocument",
            Command::DeleteDocument => "deleteDocument",
            Command::NextDocument => "nextDocument",
            Command::PrevDocument => "prevDocument",
            Command::OpenSelectedDocument => "openSelectedDocument",
            Command::ImportDocument => "importDocument",
            Command::ExportDocument => "exportDocument",
            Command::ToggleSidebar => "toggleSidebar",
            Command::ToggleTheme => "toggleTheme",
            Command::CycleViewMode => "cycleViewMode",
            Command::ViewEditor => "viewEditor",
            Command::ViewSplit => "viewSplit",
            Command::ViewPreview => "viewPreview",
            Command::FocusSidebar => "focusSidebar",
            Command::FocusEditor => "focusEditor",
            Command::ToggleFocus => "toggleFocus",
            Command::AssistContinue => "assistContinue",
            Command::AssistSummarize => "assistSummarize",
            Command::AssistFixGrammar => "assistFixGrammar",
            Command::AssistExplain => "assistExplain",
            Command::AssistTranslate => "assistTranslate",
            Command::Escape => "escape",
            Command::Quit => "quit",
            Command::Custom(name) => name,
        }
    }

    /// Unknown names become `Custom`.
    pub fn from_name(name: &str) -> Command {
        let name = name.trim();
        NAMED
            .iter()
            .find(|cmd| cmd.name().eq_ignore_ascii_case(name))
            .cloned()
            .unwrap_or_else(|| Command::Custom(name.to_string()))
    }

    pub fn assist_action(&self) -> Option<AssistAction> {
        match self {
            Command::AssistContinue => Some(AssistAction::Continue),
            Command::AssistSummarize => Some(AssistAction::Summarize),
            Command::AssistFixGrammar => Some(AssistAction::FixGrammar),
            Command::AssistExplain => Some(AssistAction::Explain),
            Command::AssistTranslate => Some(AssistAction::Translate),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
