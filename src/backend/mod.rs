pub mod gemini;

use thiserror::Error;

pub use gemini::{GeminiBackend, GeminiConfig};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Backend returned no text")]
    EmptyResponse,
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Text generation service used by the semantic ranker.
///
/// One call, no retry: the ranker falls back on the first error.
pub trait GenerativeBackend: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}

impl<B: GenerativeBackend + ?Sized> GenerativeBackend for Box<B> {
    fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        (**self).generate(prompt)
    }
}

impl<B: GenerativeBackend + ?Sized> GenerativeBackend for std::sync::Arc<B> {
    fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        (**self).generate(prompt)
    }
}
