use std::path::PathBuf;

#[derive(Debug)]
pub enum AppMessage {
    GenerationFinished {
        request_id: u64,
        result: Result<String, String>,
    },
    ImportLoaded {
        path: PathBuf,
        name: Option<String>,
        content: String,
    },
    ImportError {
        path: PathBuf,
        error: String,
    },
    ExportWritten {
        path: PathBuf,
    },
    ExportError {
        path: PathBuf,
        error: String,
    },
}
