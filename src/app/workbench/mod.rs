//! 工作台：持有 Store，把输入翻译成 Action，并执行 Store 返回的 Effect

use super::preview::PreviewLine;
use crate::core::event::InputEvent;
use crate::kernel::services::adapters::{AppMessage, AsyncRuntime, KeybindingService};
use crate::kernel::services::ports::{KeyValueStore, Settings, TextGenerator};
use crate::kernel::state::UiState;
use crate::kernel::{load_session, Action as KernelAction, AppState, FocusTarget, Store};
use crate::tui::view::EventResult;
use ratatui::layout::Rect;
use ratatui::Frame;
use std::path::PathBuf;
use std::sync::Arc;

mod bridge;
mod input;
mod render;
mod tick;

const STATUS_HEIGHT: u16 = 1;
const SIDEBAR_WIDTH: u16 = 30;
const SIDEBAR_MIN_MAIN_WIDTH: u16 = 40;

/// Everything the workbench needs from the outside world.
pub struct WorkbenchDeps {
    pub settings: Settings,
    pub kv: Box<dyn KeyValueStore>,
    pub generator: Arc<dyn TextGenerator>,
    pub export_dir: PathBuf,
}

#[derive(Debug, Default)]
struct EditorViewport {
    top: usize,
    left: usize,
    doc_id: String,
}

#[derive(Debug, Default)]
struct PreviewCache {
    source: String,
    lines: Vec<PreviewLine>,
}

pub struct Workbench {
    store: Store,
    keybindings: KeybindingService,
    runtime: AsyncRuntime,
    kv: Box<dyn KeyValueStore>,
    generator: Arc<dyn TextGenerator>,
    export_dir: PathBuf,
    viewport: EditorViewport,
    preview: PreviewCache,
    last_editor_area: Option<Rect>,
}

impl Workbench {
    pub fn new(deps: WorkbenchDeps, runtime: AsyncRuntime) -> Self {
        let WorkbenchDeps {
            settings,
            kv,
            generator,
            export_dir,
        } = deps;

        let mut keybindings = KeybindingService::new();
        let skipped = keybindings.apply_rules(&settings.keybindings);
        if skipped > 0 {
            tracing::warn!(skipped, "some keybinding rules were ignored");
        }

        let session = load_session(kv.as_ref());
        tracing::info!(
            documents = session.documents.len(),
            "session loaded"
        );
        let ui = UiState::new(settings.view_mode, settings.theme);
        let store = Store::new(AppState::new(
            session.documents,
            session.active_id.as_deref(),
            ui,
        ));

        Self {
            store,
            keybindings,
            runtime,
            kv,
            generator,
            export_dir,
            viewport: EditorViewport::default(),
            preview: PreviewCache::default(),
            last_editor_area: None,
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        input::handle_input(self, event)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        render::render(self, frame, area);
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        tick::handle_message(self, msg)
    }

    /// Queues a file for import, as if it had been typed into the import prompt.
    pub fn import_path(&mut self, path: PathBuf) {
        let _ = self.dispatch_kernel(KernelAction::ImportPath(path));
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn focus(&self) -> FocusTarget {
        self.store.state().ui.focus
    }

    pub fn sidebar_visible(&self) -> bool {
        self.store.state().ui.sidebar_open
    }

    pub fn should_quit(&self) -> bool {
        self.store.state().ui.should_quit
    }
}
