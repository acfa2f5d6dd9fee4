//! Error types for the page probe

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Page evaluation failed: {0}")]
    Evaluation(String),

    #[error("Browser script failed: {0}")]
    Script(String),

    #[error("Unexpected driver output: {0}")]
    OutputParse(String),

    #[error("Missing result for step '{0}'")]
    MissingResult(String),

    #[error("Server not reachable after {0} attempts")]
    ServerUnavailable(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type ProbeResult<T> = Result<T, ProbeError>;
