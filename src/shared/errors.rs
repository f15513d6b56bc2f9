//! Error handling for the tracker

use thiserror::Error;

/// Page fetch errors - recoverable per target, never fatal to the run
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
}

/// History store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read history: {0}")]
    Read(#[source] std::io::Error),

    #[error("invalid history JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write history: {0}")]
    Write(#[source] std::io::Error),
}

/// Webhook delivery errors - best effort, alerts stay archived either way
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("delivery failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook returned status: {0}")]
    Status(reqwest::StatusCode),
}
