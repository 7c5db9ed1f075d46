//! Text-generation contract: the remote assistant is only known through this port.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub instruction: String,
    pub system_role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationResponse {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("missing API key: set {0}")]
    MissingCredential(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("assistant returned status {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Blocking generator. Callers run it off the UI thread.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, GenerationError>;
}
