use super::Workbench;
use crate::kernel::services::adapters::AppMessage;
use crate::kernel::{Action as KernelAction, Notice};

pub(super) fn handle_message(workbench: &mut Workbench, msg: AppMessage) -> bool {
    match msg {
        AppMessage::GenerationFinished { request_id, result } => {
            if let Err(error) = &result {
                tracing::warn!(request_id, error = %error, "generation failed");
            }
            workbench.dispatch_kernel(KernelAction::AssistFinished { request_id, result })
        }
        AppMessage::ImportLoaded {
            path,
            name,
            content,
        } => {
            tracing::info!(path = %path.display(), bytes = content.len(), "import loaded");
            workbench.dispatch_kernel(KernelAction::ImportDocument { name, content })
        }
        AppMessage::ImportError { path, error } => {
            tracing::error!(path = %path.display(), error = %error, "import failed");
            workbench.dispatch_kernel(KernelAction::Notify(Notice::error(format!(
                "Could not import {}: {error}",
                path.display()
            ))))
        }
        AppMessage::ExportWritten { path } => workbench.dispatch_kernel(KernelAction::Notify(
            Notice::info(format!("Exported to {}", path.display())),
        )),
        AppMessage::ExportError { path, error } => {
            tracing::error!(path = %path.display(), error = %error, "export failed");
            workbench.dispatch_kernel(KernelAction::Notify(Notice::error(format!(
                "Could not export {}: {error}",
                path.display()
            ))))
        }
    }
}
