use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Offer absent from the cache at claim time.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Business-rule conflict (e.g. opening a mystery offer directly).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Offer cannot be acted on (e.g. missing store URL).
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<String> for DomainError {
    fn from(s: String) -> Self {
        DomainError::Database(s)
    }
}

impl From<&str> for DomainError {
    fn from(s: &str) -> Self {
        DomainError::InvalidInput(s.to_string())
    }
}
