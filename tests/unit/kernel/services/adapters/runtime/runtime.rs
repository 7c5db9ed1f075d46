use super::*;
use crate::kernel::services::ports::{GenerationError, GenerationResponse};
use std::sync::mpsc;
use std::time::Duration;
use tempfile::tempdir;

const WAIT: Duration = Duration::from_secs(5);

struct Scripted(Result<&'static str, GenerationError>);

impl TextGenerator for Scripted {
    fn generate(&self, _request: &GenerationRequest) -> Result<GenerationResponse, GenerationError> {
        self.0.clone().map(|text| GenerationResponse {
            text: text.to_string(),
        })
    }
}

fn request() -> GenerationRequest {
    GenerationRequest {
        instruction: "go".into(),
        system_role: "role".into(),
    }
}

#[test]
fn generation_result_is_reported_with_request_id() {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();

    runtime.generate(7, request(), Arc::new(Scripted(Ok("World"))));

    match rx.recv_timeout(WAIT).unwrap() {
        AppMessage::GenerationFinished { request_id, result } => {
            assert_eq!(request_id, 7);
            assert_eq!(result.as_deref(), Ok("World"));
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn generation_error_is_reported_as_message() {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();
    let failing = Scripted(Err(GenerationError::MissingCredential("GEMINI_API_KEY".into())));

    runtime.generate(1, request(), Arc::new(failing));

    match rx.recv_timeout(WAIT).unwrap() {
        AppMessage::GenerationFinished { result, .. } => {
            assert!(result.unwrap_err().contains("GEMINI_API_KEY"));
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn import_reads_lossy_utf8_and_file_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, b"# Notes\n\xff").unwrap();
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();

    runtime.read_import(path.clone());

    match rx.recv_timeout(WAIT).unwrap() {
        AppMessage::ImportLoaded {
            path: loaded,
            name,
            content,
        } => {
            assert_eq!(loaded, path);
            assert_eq!(name.as_deref(), Some("notes.md"));
            assert!(content.starts_with("# Notes\n"));
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn import_of_missing_file_reports_error() {
    let dir = tempdir().unwrap();
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();

    runtime.read_import(dir.path().join("missing.md"));

    assert!(matches!(
        rx.recv_timeout(WAIT).unwrap(),
        AppMessage::ImportError { .. }
    ));
}

#[test]
fn export_writes_content_verbatim() {
    let dir = tempdir().unwrap();
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx).unwrap();
    let artifact = ExportArtifact {
        file_name: "../escape.md".into(),
        mime_type: "text/markdown",
        content: "# Title\n".into(),
    };

    runtime.write_export(dir.path().join("out"), artifact);

    match rx.recv_timeout(WAIT).unwrap() {
        AppMessage::ExportWritten { path } => {
            assert_eq!(path, dir.path().join("out").join("escape.md"));
            assert_eq!(std::fs::read_to_string(path).unwrap(), "# Title\n");
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn export_file_name_falls_back_for_empty_names() {
    assert_eq!(export_file_name("notes.md"), "notes.md");
    assert_eq!(export_file_name("a/b/c.md"), "c.md");
    assert_eq!(export_file_name("  "), "document.md");
    assert_eq!(export_file_name(".."), "document.md");
}
