use super::*;
use crate::kernel::document::Document;
use crate::kernel::state::{NoticeLevel, UiState, ViewMode};

fn store_with(docs: &[(&str, &str)]) -> Store {
    let documents = docs
        .iter()
        .map(|(name, content)| Document::new(*name, *content))
        .collect::<Vec<_>>();
    Store::new(AppState::new(documents, None, UiState::default()))
}

fn persisted_documents(effects: &[Effect]) -> Option<&Vec<Document>> {
    effects.iter().find_map(|effect| match effect {
        Effect::PersistDocuments(docs) => Some(docs),
        _ => None,
    })
}

fn request_id(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::RequestGeneration { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("generation request")
}

fn type_text(store: &mut Store, text: &str) {
    for ch in text.chars() {
        store.dispatch(Action::Editor(EditorAction::InsertChar(ch)));
    }
}

#[test]
fn edit_writes_back_and_persists() {
    let mut store = store_with(&[("a.md", "")]);

    let result = store.dispatch(Action::Editor(EditorAction::InsertChar('x')));

    assert!(result.state_changed);
    let saved = persisted_documents(&result.effects).expect("persist effect");
    assert_eq!(saved[0].content, "x");
    assert_eq!(store.state().active_document().content, "x");
}

#[test]
fn cursor_motion_does_not_persist() {
    let mut store = store_with(&[("a.md", "abc")]);

    let result = store.dispatch(Action::RunCommand(Command::CursorFileEnd));

    assert!(result.state_changed);
    assert!(result.effects.is_empty());
    assert_eq!(store.state().buffer.cursor(), 3);
}

#[test]
fn edits_are_ignored_in_preview_mode() {
    let mut store = store_with(&[("a.md", "abc")]);
    store.dispatch(Action::SetViewMode(ViewMode::Preview));

    let result = store.dispatch(Action::Editor(EditorAction::InsertChar('x')));

    assert!(!result.state_changed);
    assert_eq!(store.state().active_document().content, "abc");
}

#[test]
fn selecting_document_reloads_buffer_and_persists_active_id() {
    let mut store = store_with(&[("a.md", "alpha"), ("b.md", "beta")]);
    let second = store.state().documents.list()[1].id.clone();

    let result = store.dispatch(Action::SelectDocument { id: second.clone() });

    assert_eq!(store.state().active.id(), second);
    assert_eq!(store.state().buffer.text(), "beta");
    assert_eq!(result.effects, vec![Effect::PersistActiveId(second)]);
}

#[test]
fn selecting_unknown_document_is_a_no_op() {
    let mut store = store_with(&[("a.md", "alpha")]);
    let before = store.state().active.id().to_string();

    let result = store.dispatch(Action::SelectDocument { id: "nope".into() });

    assert!(!result.state_changed);
    assert_eq!(store.state().active.id(), before);
}

#[test]
fn create_appends_and_activates_empty_document() {
    let mut store = store_with(&[("a.md", "alpha")]);

    let result = store.dispatch(Action::CreateDocument);

    let state = store.state();
    assert_eq!(state.documents.len(), 2);
    let created = &state.documents.list()[1];
    assert_eq!(state.active.id(), created.id);
    assert!(created.content.is_empty());
    assert!(state.buffer.text().is_empty());
    assert!(result
        .effects
        .contains(&Effect::PersistActiveId(created.id.clone())));
    assert_eq!(persisted_documents(&result.effects).map(Vec::len), Some(2));
}

#[test]
fn import_creates_active_document_with_content() {
    let mut store = store_with(&[("a.md", "alpha")]);

    store.dispatch(Action::ImportDocument {
        name: Some("notes.md".into()),
        content: "# Notes".into(),
    });

    let state = store.state();
    assert_eq!(state.active_document().name, "notes.md");
    assert_eq!(state.buffer.text(), "# Notes");
    assert_eq!(
        state.ui.notice.as_ref().map(|n| n.level),
        Some(NoticeLevel::Info)
    );
}

#[test]
fn deleting_the_last_document_is_refused() {
    let mut store = store_with(&[("only.md", "keep me")]);
    let id = store.state().active.id().to_string();

    let result = store.dispatch(Action::DeleteDocument { id });

    assert!(result.effects.is_empty());
    assert_eq!(store.state().documents.len(), 1);
    assert_eq!(store.state().buffer.text(), "keep me");
    assert_eq!(
        store.state().ui.notice.as_ref().map(|n| n.level),
        Some(NoticeLevel::Warning)
    );
}

#[test]
fn deleting_active_document_falls_back_to_first() {
    let mut store = store_with(&[("a.md", "alpha"), ("b.md", "beta")]);
    let second = store.state().documents.list()[1].id.clone();
    store.dispatch(Action::SelectDocument { id: second.clone() });

    let result = store.dispatch(Action::DeleteDocument { id: second });

    let state = store.state();
    assert_eq!(state.documents.len(), 1);
    assert_eq!(state.active_document().name, "a.md");
    assert_eq!(state.buffer.text(), "alpha");
    assert!(result
        .effects
        .contains(&Effect::PersistActiveId(state.active.id().to_string())));
}

#[test]
fn deleting_other_document_keeps_active_and_buffer() {
    let mut store = store_with(&[("a.md", "alpha"), ("b.md", "beta")]);
    store.dispatch(Action::RunCommand(Command::CursorFileEnd));
    let second = store.state().documents.list()[1].id.clone();

    let result = store.dispatch(Action::DeleteDocument { id: second });

    assert_eq!(store.state().active_document().name, "a.md");
    assert_eq!(store.state().buffer.cursor(), 5);
    assert!(!result
        .effects
        .iter()
        .any(|e| matches!(e, Effect::PersistActiveId(_))));
}

#[test]
fn delete_command_asks_for_confirmation() {
    let mut store = store_with(&[("a.md", "alpha"), ("b.md", "beta")]);

    store.dispatch(Action::RunCommand(Command::DeleteDocument));
    assert!(store.state().ui.prompt.is_some());
    assert_eq!(store.state().documents.len(), 2);

    store.dispatch(Action::PromptAppend('y'));
    assert!(store.state().ui.prompt.is_none());
    assert_eq!(store.state().documents.len(), 1);
    assert_eq!(store.state().active_document().name, "b.md");
}

#[test]
fn delete_confirmation_can_be_declined() {
    let mut store = store_with(&[("a.md", "alpha"), ("b.md", "beta")]);

    store.dispatch(Action::RunCommand(Command::DeleteDocument));
    store.dispatch(Action::PromptAppend('n'));

    assert!(store.state().ui.prompt.is_none());
    assert_eq!(store.state().documents.len(), 2);
}

#[test]
fn other_document_changes_do_not_reload_buffer() {
    let mut store = store_with(&[("a.md", "alpha"), ("b.md", "beta")]);
    store.dispatch(Action::RunCommand(Command::CursorFileEnd));
    store.dispatch(Action::RunCommand(Command::SelectLeft));

    store.dispatch(Action::CreateDocument);
    let created = store.state().active.id().to_string();
    let first = store.state().documents.list()[0].id.clone();
    store.dispatch(Action::SelectDocument { id: first });
    store.dispatch(Action::RunCommand(Command::CursorFileEnd));
    store.dispatch(Action::DeleteDocument { id: created });

    assert_eq!(store.state().buffer.cursor(), 5);
    assert_eq!(store.state().buffer.text(), "alpha");
}

#[test]
fn summarize_without_selection_is_rejected() {
    let mut store = store_with(&[("a.md", "some text")]);

    let result = store.dispatch(Action::Assist(AssistAction::Summarize));

    assert!(result.effects.is_empty());
    assert!(!store.state().assist.is_in_flight());
    let notice = store.state().ui.notice.as_ref().expect("notice");
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert!(notice.message.contains("Select some text"));
}

#[test]
fn continue_appends_generated_text_after_selection() {
    let mut store = store_with(&[("a.md", "")]);
    type_text(&mut store, "Hello");
    store.dispatch(Action::RunCommand(Command::SelectAll));

    let result = store.dispatch(Action::RunCommand(Command::AssistContinue));
    let id = request_id(&result.effects);
    let applied = store.dispatch(Action::AssistFinished {
        request_id: id,
        result: Ok("World".into()),
    });

    assert_eq!(store.state().buffer.text(), "Hello\nWorld");
    assert_eq!(store.state().active_document().content, "Hello\nWorld");
    assert!(persisted_documents(&applied.effects).is_some());
    assert!(!store.state().assist.is_in_flight());
}

#[test]
fn fix_grammar_replaces_selection() {
    let mut store = store_with(&[("a.md", "")]);
    type_text(&mut store, "Teh cat");
    store.dispatch(Action::Editor(EditorAction::SetSelection { start: 0, end: 3 }));

    let result = store.dispatch(Action::Assist(AssistAction::FixGrammar));
    let id = request_id(&result.effects);
    store.dispatch(Action::AssistFinished {
        request_id: id,
        result: Ok("The".into()),
    });

    assert_eq!(store.state().buffer.text(), "The cat");
}

#[test]
fn second_assist_is_rejected_while_in_flight() {
    let mut store = store_with(&[("a.md", "Hello")]);

    let first = store.dispatch(Action::Assist(AssistAction::Continue));
    let second = store.dispatch(Action::Assist(AssistAction::Continue));

    assert_eq!(first.effects.len(), 1);
    assert!(second.effects.is_empty());
    assert_eq!(
        store.state().ui.notice.as_ref().map(|n| n.level),
        Some(NoticeLevel::Warning)
    );
}

#[test]
fn failed_generation_leaves_content_and_reports_error() {
    let mut store = store_with(&[("a.md", "Hello")]);
    store.dispatch(Action::RunCommand(Command::SelectAll));

    let result = store.dispatch(Action::Assist(AssistAction::Explain));
    let id = request_id(&result.effects);
    store.dispatch(Action::AssistFinished {
        request_id: id,
        result: Err("network down".into()),
    });

    assert_eq!(store.state().buffer.text(), "Hello");
    let notice = store.state().ui.notice.as_ref().expect("notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(!store.state().assist.is_in_flight());
}

#[test]
fn result_is_discarded_when_anchor_span_changed() {
    let mut store = store_with(&[("a.md", "")]);
    type_text(&mut store, "Teh cat");
    store.dispatch(Action::Editor(EditorAction::SetSelection { start: 0, end: 3 }));
    let id = request_id(&store.dispatch(Action::Assist(AssistAction::FixGrammar)).effects);

    store.dispatch(Action::Editor(EditorAction::InsertText("A".into())));
    store.dispatch(Action::AssistFinished {
        request_id: id,
        result: Ok("The".into()),
    });

    assert_eq!(store.state().buffer.text(), "A cat");
    assert_eq!(
        store.state().ui.notice.as_ref().map(|n| n.level),
        Some(NoticeLevel::Warning)
    );
}

#[test]
fn continue_is_discarded_when_text_before_insertion_point_changed() {
    let mut store = store_with(&[("a.md", "")]);
    type_text(&mut store, "Hello");
    let id = request_id(&store.dispatch(Action::Assist(AssistAction::Continue)).effects);

    store.dispatch(Action::Editor(EditorAction::SetSelection { start: 0, end: 0 }));
    type_text(&mut store, "Oh ");
    store.dispatch(Action::AssistFinished {
        request_id: id,
        result: Ok("World".into()),
    });

    assert_eq!(store.state().buffer.text(), "Oh Hello");
    assert_eq!(store.state().documents.list()[0].content, "Oh Hello");
    assert_eq!(
        store.state().ui.notice.as_ref().map(|n| n.level),
        Some(NoticeLevel::Warning)
    );
    assert!(!store.state().assist.is_in_flight());
}

#[test]
fn continue_applies_when_only_later_text_changed() {
    let mut store = store_with(&[("a.md", "")]);
    type_text(&mut store, "Hello");
    store.dispatch(Action::Editor(EditorAction::SetSelection { start: 2, end: 2 }));
    let id = request_id(&store.dispatch(Action::Assist(AssistAction::Continue)).effects);

    store.dispatch(Action::Editor(EditorAction::SetSelection { start: 5, end: 5 }));
    type_text(&mut store, "!");
    store.dispatch(Action::AssistFinished {
        request_id: id,
        result: Ok("y".into()),
    });

    assert_eq!(store.state().buffer.text(), "He\nyllo!");
}

#[test]
fn result_for_background_document_updates_the_store_only() {
    let mut store = store_with(&[("a.md", "Teh"), ("b.md", "beta")]);
    store.dispatch(Action::RunCommand(Command::SelectAll));
    let id = request_id(&store.dispatch(Action::Assist(AssistAction::FixGrammar)).effects);
    let second = store.state().documents.list()[1].id.clone();
    store.dispatch(Action::SelectDocument { id: second });

    let result = store.dispatch(Action::AssistFinished {
        request_id: id,
        result: Ok("The".into()),
    });

    assert_eq!(store.state().documents.list()[0].content, "The");
    assert_eq!(store.state().buffer.text(), "beta");
    assert!(persisted_documents(&result.effects).is_some());
}

#[test]
fn unknown_request_id_is_ignored() {
    let mut store = store_with(&[("a.md", "Hello")]);

    let result = store.dispatch(Action::AssistFinished {
        request_id: 42,
        result: Ok("ignored".into()),
    });

    assert!(!result.state_changed);
    assert_eq!(store.state().buffer.text(), "Hello");
}

#[test]
fn import_prompt_submits_path() {
    let mut store = store_with(&[("a.md", "alpha")]);

    store.dispatch(Action::RunCommand(Command::ImportDocument));
    for ch in "/tmp/notes.md".chars() {
        store.dispatch(Action::PromptAppend(ch));
    }
    let result = store.dispatch(Action::PromptSubmit);

    assert_eq!(
        result.effects,
        vec![Effect::ReadImport(std::path::PathBuf::from("/tmp/notes.md"))]
    );
    assert!(store.state().ui.prompt.is_none());
}

#[test]
fn export_emits_markdown_artifact() {
    let mut store = store_with(&[("notes.md", "# Title")]);

    let result = store.dispatch(Action::RunCommand(Command::ExportDocument));

    match result.effects.as_slice() {
        [Effect::WriteExport(artifact)] => {
            assert_eq!(artifact.file_name, "notes.md");
            assert_eq!(artifact.mime_type, "text/markdown");
            assert_eq!(artifact.content, "# Title");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn sidebar_focus_routes_arrows_to_document_list() {
    let mut store = store_with(&[("a.md", "alpha"), ("b.md", "beta")]);
    store.dispatch(Action::RunCommand(Command::FocusSidebar));

    store.dispatch(Action::RunCommand(Command::CursorDown));
    assert_eq!(store.state().ui.sidebar_selected, 1);
    assert_eq!(store.state().buffer.text(), "alpha");

    store.dispatch(Action::RunCommand(Command::InsertNewline));
    assert_eq!(store.state().buffer.text(), "beta");
    assert_eq!(store.state().ui.focus, FocusTarget::Editor);
}

#[test]
fn escape_unwinds_prompt_then_notice_then_selection() {
    let mut store = store_with(&[("a.md", "alpha")]);
    store.dispatch(Action::RunCommand(Command::SelectAll));
    store.dispatch(Action::Notify(Notice::info("hi")));
    store.dispatch(Action::RunCommand(Command::ImportDocument));

    store.dispatch(Action::RunCommand(Command::Escape));
    assert!(store.state().ui.prompt.is_none());
    assert!(store.state().ui.notice.is_some());

    store.dispatch(Action::RunCommand(Command::Escape));
    assert!(store.state().ui.notice.is_none());
    assert!(store.state().buffer.has_selection());

    store.dispatch(Action::RunCommand(Command::Escape));
    assert!(!store.state().buffer.has_selection());
}

#[test]
fn next_document_wraps_around() {
    let mut store = store_with(&[("a.md", "alpha"), ("b.md", "beta")]);

    store.dispatch(Action::RunCommand(Command::NextDocument));
    assert_eq!(store.state().active_document().name, "b.md");
    store.dispatch(Action::RunCommand(Command::NextDocument));
    assert_eq!(store.state().active_document().name, "a.md");
    store.dispatch(Action::RunCommand(Command::PrevDocument));
    assert_eq!(store.state().active_document().name, "b.md");
}

mod sequences {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Step {
        Create,
        Delete(usize),
        DeleteActive,
        Select(usize),
        Type(char),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            Just(Step::Create),
            (0usize..8).prop_map(Step::Delete),
            Just(Step::DeleteActive),
            (0usize..8).prop_map(Step::Select),
            prop::char::range('a', 'z').prop_map(Step::Type),
        ]
    }

    fn nth_id(store: &Store, index: usize) -> String {
        let docs = store.state().documents.list();
        docs[index % docs.len()].id.clone()
    }

    proptest! {
        #[test]
        fn active_document_stays_valid_across_create_and_delete(
            steps in prop::collection::vec(step(), 1..60)
        ) {
            let mut store = store_with(&[("a.md", "alpha"), ("b.md", "beta")]);

            for step in steps {
                let action = match step {
                    Step::Create => Action::CreateDocument,
                    Step::Delete(index) => Action::DeleteDocument { id: nth_id(&store, index) },
                    Step::DeleteActive => Action::DeleteDocument {
                        id: store.state().active.id().to_string(),
                    },
                    Step::Select(index) => Action::SelectDocument { id: nth_id(&store, index) },
                    Step::Type(ch) => Action::Editor(EditorAction::InsertChar(ch)),
                };
                store.dispatch(action);

                let state = store.state();
                prop_assert!(!state.documents.is_empty());
                prop_assert!(state.documents.contains(state.active.id()));
                prop_assert_eq!(state.buffer.text(), state.active_document().content.as_str());
            }
        }
    }
}
