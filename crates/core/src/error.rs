#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unsupported document path: {0}")]
    UnsupportedPath(String),
}
