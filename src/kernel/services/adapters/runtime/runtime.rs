use super::message::AppMessage;
use crate::kernel::effect::ExportArtifact;
use crate::kernel::services::ports::{GenerationRequest, TextGenerator};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, tx })
    }

    /// Runs the blocking generator on the blocking pool; always answers with `GenerationFinished`.
    pub fn generate(
        &self,
        request_id: u64,
        request: GenerationRequest,
        generator: Arc<dyn TextGenerator>,
    ) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let joined =
                tokio::task::spawn_blocking(move || generator.generate(&request)).await;
            let result = match joined {
                Ok(Ok(response)) => Ok(response.text),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) => Err(format!("assistant task failed: {e}")),
            };
            let _ = tx.send(AppMessage::GenerationFinished { request_id, result });
        });
    }

    pub fn read_import(&self, path: PathBuf) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let content = String::from_utf8_lossy(&bytes).into_owned();
                    let name = import_name(&path);
                    let _ = tx.send(AppMessage::ImportLoaded {
                        path,
                        name,
                        content,
                    });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::ImportError {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    pub fn write_export(&self, dir: PathBuf, artifact: ExportArtifact) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let path = dir.join(export_file_name(&artifact.file_name));
            let result = async {
                tokio::fs::create_dir_all(&dir).await?;
                tokio::fs::write(&path, artifact.content.as_bytes()).await
            }
            .await;
            match result {
                Ok(()) => {
                    let _ = tx.send(AppMessage::ExportWritten { path });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::ExportError {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        });
    }
}

fn import_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Document names are free text; keep only the last path component.
fn export_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .unwrap_or_default();
    if base.is_empty() || base == "." || base == ".." {
        "document.md".to_string()
    } else {
        base.to_string()
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/runtime.rs"]
mod tests;
