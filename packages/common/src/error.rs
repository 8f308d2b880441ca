use thiserror::Error;

/// Common error type shared by the pagecraft crates
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Invalid path '{0}': expected dot-separated indices")]
    InvalidPath(String),

    #[error("Invalid drop zone '{0}': expected 'before' or 'after'")]
    InvalidDropZone(String),
}
