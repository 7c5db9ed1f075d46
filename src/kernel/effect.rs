use std::path::PathBuf;

use crate::kernel::document::Document;
use crate::kernel::services::ports::GenerationRequest;

pub const MARKDOWN_MIME: &str = "text/markdown";

/// A downloadable copy of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl ExportArtifact {
    pub fn from_document(doc: &Document) -> Self {
        let file_name = if doc.name.trim().is_empty() {
            "document.md".to_string()
        } else {
            doc.name.clone()
        };
        Self {
            file_name,
            mime_type: MARKDOWN_MIME,
            content: doc.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Full serialization of the collection under the documents key.
    PersistDocuments(Vec<Document>),
    PersistActiveId(String),
    RequestGeneration {
        request_id: u64,
        request: GenerationRequest,
    },
    ReadImport(PathBuf),
    WriteExport(ExportArtifact),
}
