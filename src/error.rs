//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`SearchError`](crate::search::SearchError), [`ConfigError`](crate::config::ConfigError)).
//! The search command reports through [`Error`]; the dispatcher uses `anyhow`.

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Catalog search error
    #[error(transparent)]
    Search(#[from] crate::search::SearchError),

    /// Output serialization error
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// Terminal I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
