use super::*;

fn docs(names: &[&str]) -> Vec<Document> {
    names.iter().map(|n| Document::new(*n, "")).collect()
}

#[test]
fn resolve_keeps_known_id() {
    let documents = docs(&["a", "b"]);
    let id = documents[1].id.clone();

    assert_eq!(resolve(Some(&id), &documents), Some(id.as_str()));
}

#[test]
fn resolve_falls_back_to_first_document() {
    let documents = docs(&["a", "b"]);

    assert_eq!(resolve(Some("stale"), &documents), Some(documents[0].id.as_str()));
    assert_eq!(resolve(None, &documents), Some(documents[0].id.as_str()));
}

#[test]
fn resolve_on_empty_collection_is_none() {
    assert_eq!(resolve(Some("x"), &[]), None);
}

#[test]
fn select_reports_change() {
    let documents = docs(&["a", "b"]);
    let mut active = ActiveDocument::new(None, &documents);
    assert_eq!(active.id(), documents[0].id);

    assert!(!active.select(&documents[0].id));
    assert!(active.select(&documents[1].id));
    assert_eq!(active.id(), documents[1].id);
}

#[test]
fn reconcile_after_removal_moves_to_first() {
    let mut documents = docs(&["a", "b", "c"]);
    let mut active = ActiveDocument::new(Some(documents[2].id.as_str()), &documents);

    documents.remove(2);

    assert!(active.reconcile(&documents));
    assert_eq!(active.id(), documents[0].id);
    assert!(!active.reconcile(&documents));
}
