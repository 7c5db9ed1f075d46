use super::Workbench;
use crate::kernel::session::{save_active_id, save_documents};
use crate::kernel::{Action as KernelAction, Effect as KernelEffect, Notice};

impl Workbench {
    pub(super) fn dispatch_kernel(&mut self, action: KernelAction) -> bool {
        let result = self.store.dispatch(action);
        let mut state_changed = result.state_changed;
        for effect in result.effects {
            state_changed |= self.run_effect(effect);
        }
        state_changed
    }

    /// Returns whether running the effect fed anything back into the store.
    fn run_effect(&mut self, effect: KernelEffect) -> bool {
        match effect {
            KernelEffect::PersistDocuments(documents) => {
                match save_documents(self.kv.as_mut(), &documents) {
                    Ok(()) => false,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to persist documents");
                        self.dispatch_kernel(KernelAction::Notify(Notice::error(format!(
                            "Could not save documents: {e}"
                        ))))
                    }
                }
            }
            KernelEffect::PersistActiveId(id) => match save_active_id(self.kv.as_mut(), &id) {
                Ok(()) => false,
                Err(e) => {
                    tracing::error!(doc_id = %id, error = %e, "failed to persist active id");
                    self.dispatch_kernel(KernelAction::Notify(Notice::error(format!(
                        "Could not save selection: {e}"
                    ))))
                }
            },
            KernelEffect::RequestGeneration {
                request_id,
                request,
            } => {
                self.runtime
                    .generate(request_id, request, self.generator.clone());
                false
            }
            KernelEffect::ReadImport(path) => {
                tracing::info!(path = %path.display(), "importing file");
                self.runtime.read_import(path);
                false
            }
            KernelEffect::WriteExport(artifact) => {
                tracing::info!(
                    file = %artifact.file_name,
                    mime = artifact.mime_type,
                    dir = %self.export_dir.display(),
                    "exporting document"
                );
                self.runtime.write_export(self.export_dir.clone(), artifact);
                false
            }
        }
    }
}
