use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForwardError>;

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Non-success upstream status. The body is kept for logging only.
    #[error("upstream returned HTTP {0}")]
    Http(u16, String),

    #[error("Failed to parse upstream response: {0}")]
    Parse(String),
}
