#[derive(Debug, thiserror::Error)]
pub enum StatePathError {
    #[error("failed to resolve home directory for state root")]
    HomeDirectoryUnavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write clipboard text: {0}")]
    Write(String),
}
