//! Headless application core (state/action/effect).
//!
//! Nothing in here touches the terminal; adapters and the workbench feed
//! actions in and execute the effects that come back out.

pub mod action;
pub mod active;
pub mod assist;
pub mod buffer;
pub mod document;
pub mod effect;
pub mod services;
pub mod session;
pub mod state;
pub mod store;

pub use action::{Action, EditorAction};
pub use active::ActiveDocument;
pub use assist::{AssistAction, AssistState, AssistStatus, PendingAssist};
pub use buffer::{EditorBuffer, Motion};
pub use document::{Document, DocumentError, DocumentStore};
pub use effect::{Effect, ExportArtifact};
pub use session::{load_session, Session};
pub use state::{
    AppState, FocusTarget, Notice, NoticeLevel, PromptKind, PromptState, ThemeMode, UiState,
    ViewMode,
};
pub use store::{DispatchResult, Store};
