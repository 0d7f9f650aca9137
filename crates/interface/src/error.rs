#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
    #[error("invalid content: {0}")]
    InvalidContent(String),
    #[error("translation backend failed")]
    BackendFailure(#[source] anyhow::Error),
    #[error("measurement oracle failed")]
    OracleFailure(#[source] anyhow::Error),
    #[error("task cancelled")]
    Cancelled,
}
