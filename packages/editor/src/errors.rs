//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Document has no pages")]
    NoPages,

    #[error("Document is not file-backed")]
    NotFileBacked,
}
