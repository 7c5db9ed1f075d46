use super::document::Document;

/// Returns `id` when it names a document in `documents`, otherwise the first document's id.
/// `None` only for an empty slice.
pub fn resolve<'a>(id: Option<&'a str>, documents: &'a [Document]) -> Option<&'a str> {
    match id {
        Some(id) if documents.iter().any(|doc| doc.id == id) => Some(id),
        _ => documents.first().map(|doc| doc.id.as_str()),
    }
}

/// The id of the document currently loaded into the editor buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDocument {
    id: String,
}

impl ActiveDocument {
    pub fn new(stored: Option<&str>, documents: &[Document]) -> Self {
        let id = resolve(stored, documents).unwrap_or_default().to_string();
        Self { id }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns whether the active id changed.
    pub fn select(&mut self, id: &str) -> bool {
        if self.id == id {
            return false;
        }
        self.id.clear();
        self.id.push_str(id);
        true
    }

    /// Re-resolves against the current collection, e.g. after a deletion.
    pub fn reconcile(&mut self, documents: &[Document]) -> bool {
        let resolved = resolve(Some(self.id.as_str()), documents)
            .unwrap_or_default()
            .to_string();
        self.select(&resolved)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/active.rs"]
mod tests;
