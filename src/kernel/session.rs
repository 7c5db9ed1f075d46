//! Startup load and write-through of the document collection and active id.

use super::document::{Document, DocumentStore};
use super::services::ports::{KeyValueStore, KvError};

pub const DOCUMENTS_KEY: &str = "mdtyper_files";
pub const ACTIVE_ID_KEY: &str = "mdtyper_current_id";

#[derive(Debug, Clone)]
pub struct Session {
    pub documents: Vec<Document>,
    pub active_id: Option<String>,
}

/// Reads both keys once. Missing or malformed data falls back to the seed document.
pub fn load_session(kv: &dyn KeyValueStore) -> Session {
    let documents = match kv.get(DOCUMENTS_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<Document>>(&raw) {
            Ok(documents) if !documents.is_empty() => documents,
            Ok(_) => {
                tracing::info!("stored document list is empty, seeding");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored documents are malformed, seeding");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read stored documents, seeding");
            Vec::new()
        }
    };
    let documents = if documents.is_empty() {
        DocumentStore::seeded().list().to_vec()
    } else {
        documents
    };

    let active_id = match kv.get(ACTIVE_ID_KEY) {
        Ok(value) => value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read active document id");
            None
        }
    };

    Session {
        documents,
        active_id,
    }
}

pub fn save_documents(kv: &mut dyn KeyValueStore, documents: &[Document]) -> Result<(), KvError> {
    let raw = serde_json::to_string(documents)
        .map_err(|e| KvError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    kv.set(DOCUMENTS_KEY, &raw)
}

pub fn save_active_id(kv: &mut dyn KeyValueStore, id: &str) -> Result<(), KvError> {
    kv.set(ACTIVE_ID_KEY, id)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/session.rs"]
mod tests;
