use super::*;
use crate::kernel::document::WELCOME_NAME;
use crate::kernel::services::ports::MemoryKeyValueStore;

#[test]
fn empty_store_yields_single_seed_document() {
    let kv = MemoryKeyValueStore::new();

    let session = load_session(&kv);

    assert_eq!(session.documents.len(), 1);
    assert_eq!(session.documents[0].name, WELCOME_NAME);
    assert!(session.active_id.is_none());
}

#[test]
fn malformed_documents_fall_back_to_seed() {
    let kv = MemoryKeyValueStore::new()
        .with_entry(DOCUMENTS_KEY, "{not json")
        .with_entry(ACTIVE_ID_KEY, "abc");

    let session = load_session(&kv);

    assert_eq!(session.documents.len(), 1);
    assert_eq!(session.documents[0].name, WELCOME_NAME);
    assert_eq!(session.active_id.as_deref(), Some("abc"));
}

#[test]
fn empty_array_is_seeded() {
    let kv = MemoryKeyValueStore::new().with_entry(DOCUMENTS_KEY, "[]");
    assert_eq!(load_session(&kv).documents.len(), 1);
}

#[test]
fn saved_documents_load_back_in_order() {
    let mut kv = MemoryKeyValueStore::new();
    let documents = vec![Document::new("a.md", "alpha"), Document::new("b.md", "beta")];

    save_documents(&mut kv, &documents).unwrap();
    save_active_id(&mut kv, &documents[1].id).unwrap();
    let session = load_session(&kv);

    assert_eq!(session.documents, documents);
    assert_eq!(session.active_id.as_deref(), Some(documents[1].id.as_str()));
}

#[test]
fn reads_records_written_by_other_tools() {
    let raw = r#"[{"id":"default","name":"Welcome.md","content":"hi","createdAt":1700000000000}]"#;
    let kv = MemoryKeyValueStore::new().with_entry(DOCUMENTS_KEY, raw);

    let session = load_session(&kv);

    assert_eq!(session.documents[0].id, "default");
    assert_eq!(session.documents[0].created_at, 1_700_000_000_000);
}
