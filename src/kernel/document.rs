//! 文档集合：唯一的持久化实体及其有序存储。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const WELCOME_NAME: &str = "Welcome.md";

pub const WELCOME_CONTENT: &str = "# Welcome to mdtyper

A minimalist Markdown editor for the terminal.

## Features

- **Distraction-free**: Clean interface focused on writing.
- **Split View**: Edit and preview side-by-side.
- **Dark Mode**: Easy on the eyes.

## Try it out

Start typing on the left and see the rendered Markdown on the right.

| Command | Description |
|---------|-------------|
| Ctrl+N  | New document |
| Ctrl+B  | Toggle sidebar |
| Ctrl+P  | Cycle view mode |

Happy writing!
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub content: String,
    /// Unix milliseconds.
    pub created_at: i64,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            content: content.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn welcome() -> Self {
        Self::new(WELCOME_NAME, WELCOME_CONTENT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("cannot delete the last remaining document")]
    LastDocument,
    #[error("document not found: {0}")]
    NotFound(String),
}

/// Ordered document collection. Never empty.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    /// An empty input is replaced by the welcome document.
    pub fn new(documents: Vec<Document>) -> Self {
        if documents.is_empty() {
            return Self::seeded();
        }
        Self { documents }
    }

    pub fn seeded() -> Self {
        Self {
            documents: vec![Document::welcome()],
        }
    }

    pub fn list(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.documents.iter().position(|doc| doc.id == id)
    }

    pub fn first(&self) -> &Document {
        &self.documents[0]
    }

    /// Appends a new document. The caller decides whether it becomes active.
    pub fn create(&mut self, name: Option<String>, content: impl Into<String>) -> &Document {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.untitled_name());
        let mut doc = Document::new(name, content);
        while self.contains(&doc.id) {
            doc.id = Uuid::new_v4().to_string();
        }
        tracing::debug!(doc_id = %doc.id, name = %doc.name, "document created");
        self.documents.push(doc);
        &self.documents[self.documents.len() - 1]
    }

    /// Returns `false` when no document matches `id`.
    pub fn update(&mut self, id: &str, content: &str) -> bool {
        match self.documents.iter_mut().find(|doc| doc.id == id) {
            Some(doc) => {
                if doc.content != content {
                    doc.content.clear();
                    doc.content.push_str(content);
                }
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> Result<Document, DocumentError> {
        if self.documents.len() == 1 {
            return Err(DocumentError::LastDocument);
        }
        let index = self
            .position(id)
            .ok_or_else(|| DocumentError::NotFound(id.to_string()))?;
        let removed = self.documents.remove(index);
        tracing::debug!(doc_id = %removed.id, "document deleted");
        Ok(removed)
    }

    pub fn untitled_name(&self) -> String {
        format!("Untitled {}.md", self.documents.len() + 1)
    }

    pub fn imported_name(&self) -> String {
        format!("Imported-{}.md", self.documents.len() + 1)
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/document.rs"]
mod tests;
